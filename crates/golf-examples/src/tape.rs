//! VHS tape scripts that record a golf example.

use std::fmt;
use std::path::Path;

use crate::example::Example;
use crate::helix_config;
use crate::keys::{KeyCode, KeyEvent, KeyModifiers};

/// Tape for one example.
///
/// Opens the example's before-file in Helix with the generated config, types
/// every key of the command, then saves the file so it can be compared with
/// the expected result.
pub struct Tape<'a> {
    example: &'a Example,
    generated_dir: &'a Path,
}

impl<'a> Tape<'a> {
    #[must_use]
    pub fn new(example: &'a Example, generated_dir: &'a Path) -> Self {
        Self {
            example,
            generated_dir,
        }
    }
}

impl fmt::Display for Tape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = self.generated_dir.display();
        let name = &self.example.name;
        let ext = &self.example.ext;
        writeln!(
            f,
            "Output {dir}/{name}.mp4\n\
             Require hx\n\
             \n\
             Hide\n\
             Set Shell \"bash\"\n\
             Set FontSize 20\n\
             Set Width 1200\n\
             Set Height 600\n\
             Set Padding 0\n\
             Set Theme \"Catppuccin Mocha\"\n\
             Set TypingSpeed 150ms\n\
             Type \"hx -c {dir}/{config} {dir}/{name}.{ext}\"\n\
             Enter\n\
             Show\n",
            config = helix_config::FILE_NAME,
        )?;

        for key in &self.example.key_events {
            writeln!(f, "{}", VhsKey(key))?;
        }

        f.write_str(
            "\n\
             Escape\n\
             Type \",\"\n\
             \n\
             Hide\n\
             Type \":w!\"\n\
             Enter\n\
             Show\n\
             \n\
             Sleep 2s",
        )
    }
}

/// A key event in VHS syntax.
pub struct VhsKey<'a>(pub &'a KeyEvent);

impl fmt::Display for VhsKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let KeyEvent { code, modifiers } = *self.0;
        let mut mods = String::new();
        for (flag, prefix) in [
            (KeyModifiers::SUPER, "Meta+"),
            (KeyModifiers::SHIFT, "Shift+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::CONTROL, "Ctrl+"),
        ] {
            if modifiers.contains(flag) {
                mods.push_str(prefix);
            }
        }

        let name = match code {
            KeyCode::Char(ch) => {
                if mods.is_empty() {
                    return if ch == '"' {
                        // Double quotes are quoted with backticks.
                        f.write_str("Type `\"`")
                    } else {
                        write!(f, "Type \"{ch}\"")
                    };
                }
                if modifiers == KeyModifiers::ALT
                    && let Some(ctrl) = helix_config::remap_alt(ch)
                {
                    return write!(f, "Ctrl+\"{ctrl}\"");
                }
                return write!(f, "{mods}\"{ch}\"");
            }
            KeyCode::F(n) => return write!(f, "{mods}F{n}"),
            KeyCode::Backspace => "Backspace",
            KeyCode::Enter => "Enter",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::Tab => "Tab",
            KeyCode::Delete => "Delete",
            KeyCode::Insert => "Insert",
            KeyCode::Null => "Null",
            KeyCode::Esc => "Escape",
        };
        write!(f, "{mods}{name}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::keys::parse_keys;

    fn vhs(command: &str) -> Vec<String> {
        parse_keys(command)
            .unwrap()
            .iter()
            .map(|key| VhsKey(key).to_string())
            .collect()
    }

    #[test]
    fn test_plain_keys_are_typed() {
        assert_eq!(vhs("ms\""), vec!["Type \"m\"", "Type \"s\"", "Type `\"`"]);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            vhs("<esc><ret><S-tab><F5>"),
            vec!["Escape", "Enter", "Shift+Tab", "F5"]
        );
    }

    #[test]
    fn test_alt_chords_remapped() {
        assert_eq!(
            vhs("<A-s><A-J><A-(><A-x><C-A-s>"),
            vec![
                "Ctrl+\"s\"",
                "Ctrl+\"y\"",
                "Ctrl+\"z\"",
                "Alt+\"x\"",
                "Alt+Ctrl+\"s\"",
            ]
        );
    }

    #[test]
    fn test_tape_script() {
        let example = Example {
            name: "text-into-array".to_owned(),
            ext: "json".to_owned(),
            key_events: parse_keys("%<A-s>").unwrap(),
            ..Example::default()
        };
        let tape = Tape::new(&example, Path::new("/site/public/generated")).to_string();

        assert!(tape.starts_with("Output /site/public/generated/text-into-array.mp4\nRequire hx\n"));
        assert!(tape.contains(
            "Type \"hx -c /site/public/generated/helix-config.toml /site/public/generated/text-into-array.json\"\nEnter\nShow\n\n"
        ));
        assert!(tape.contains("Show\n\nType \"%\"\nCtrl+\"s\"\n\nEscape\n"));
        assert!(tape.ends_with("Type \":w!\"\nEnter\nShow\n\nSleep 2s"));
    }
}
