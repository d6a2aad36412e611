//! Generated landing page listing every example.

use std::fmt::Write;

use crate::example::Example;

/// Marker identifying the page as generated.
pub const GENERATED_MARKER: &str = "<!-- @generated by `golf examples validate`, do not edit -->";

const INTRO: &str = "\
Helix is a modal text editor with multiple selections and structural \
editing built in. Each example below takes a file from its *Before* state \
to its *After* state with as few keystrokes as possible, and explains every \
step of the command.

You can try an example yourself: copy the *Before* text into a file, open it \
in `hx`, and type the command.";

/// Render the `index.md` page for `examples`.
///
/// Example pages are linked relative to the index, which lives in the same
/// directory. `video_prefix` is the URL directory holding the recorded demos
/// (already carrying any base path).
#[must_use]
pub fn render_index(examples: &[Example], video_prefix: &str) -> String {
    let video_prefix = video_prefix.trim_end_matches('/');
    let mut md = String::from("---\ntitle: Helix Golf\nsidebar:\n  order: 0\n  label: Overview\n---\n\n");
    let _ = writeln!(md, "{GENERATED_MARKER}\n");
    let _ = writeln!(md, "# Helix Golf\n\n{INTRO}\n\n## Demo for each example");

    for example in examples {
        let _ = write!(md, "\n### [{}]({}/)\n\n", example.title, example.name);
        if let Some(description) = &example.description {
            let _ = write!(md, "{description}\n\n");
        }
        let _ = writeln!(
            md,
            "<video autoplay controls loop muted>\n  \
             <source src=\"{video_prefix}/{}.mp4\" type=\"video/mp4\">\n\
             </video>",
            example.name
        );
    }
    md
}
