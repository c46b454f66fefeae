//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encode a single URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// URL of a post page
///
/// # Examples
/// ```ignore
/// post_href("/blog/", "hello-world") // -> "/blog/hello-world.html"
/// ```
pub fn post_href(prefix: &str, slug: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    format!("{}/{}.html", prefix, encode_segment(slug))
}
