//! Demo video section for golf example pages.

const COMMAND_HEADING: &str = "## Command";

/// Insert a `## Preview` section with the demo video before `## Command`.
///
/// `video_src` is the final URL of the recording. Pages without a
/// `## Command` heading are returned unchanged.
///
/// ```
/// use golf_site::insert_preview;
///
/// let body = insert_preview("# T\n\n## Command\n", "/generated/t.mp4");
/// assert!(body.contains("## Preview"));
/// assert!(body.find("## Preview") < body.find("## Command"));
/// ```
#[must_use]
pub fn insert_preview(body: &str, video_src: &str) -> String {
    let Some(start) = find_heading(body) else {
        return body.to_owned();
    };
    let (before, after) = body.split_at(start);
    format!(
        "{before}## Preview\n\n\
         <video controls>\n  <source src=\"{video_src}\" type=\"video/mp4\">\n</video>\n\n\
         {after}"
    )
}

/// Byte offset of the `## Command` heading line.
fn find_heading(body: &str) -> Option<usize> {
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.trim_end() == COMMAND_HEADING {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}
