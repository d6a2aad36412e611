//! Helix configuration used by the demo recordings.
//!
//! VHS cannot send some Alt chords, so those commands are rebound to Ctrl
//! chords in the generated config and typed as Ctrl chords in the tape.

use std::fmt::Write;

/// File name of the generated config inside the generated directory.
pub const FILE_NAME: &str = "helix-config.toml";

/// An Alt chord rebound to a Ctrl chord.
struct Remap {
    alt: char,
    ctrl: char,
    command: &'static str,
}

const REMAPS: &[Remap] = &[
    Remap {
        alt: 's',
        ctrl: 's',
        command: "split_selection_on_newline",
    },
    Remap {
        alt: 'J',
        ctrl: 'y',
        command: "join_selections_space",
    },
    Remap {
        alt: '(',
        ctrl: 'z',
        command: "rotate_selection_contents_backward",
    },
];

/// Ctrl chord to type in place of `Alt+<ch>`, if it is remapped.
#[must_use]
pub fn remap_alt(ch: char) -> Option<char> {
    REMAPS.iter().find(|r| r.alt == ch).map(|r| r.ctrl)
}

/// Render the Helix config TOML.
#[must_use]
pub fn render() -> String {
    let mut bindings = String::new();
    for remap in REMAPS {
        let _ = writeln!(
            bindings,
            "# Original: Alt + {}\nC-{} = \"{}\"\n",
            remap.alt, remap.ctrl, remap.command
        );
    }

    format!(
        "theme = \"base16_transparent\"\n\
         \n\
         [editor]\n\
         true-color = false\n\
         auto-format = false\n\
         lsp.enable = false\n\
         \n\
         [editor.gutters]\n\
         layout = [\"line-numbers\", \"spacer\"]\n\
         \n\
         [keys.normal]\n\
         {bindings}\
         [keys.select]\n\
         {bindings}"
    )
}
