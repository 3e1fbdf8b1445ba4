//! Path grammar.
//!
//! A path locates a value inside the compared structure. The root is the
//! empty string and each descent appends one segment:
//!
//! | descent        | segment          |
//! |----------------|------------------|
//! | record field   | `.<name>`        |
//! | sequence index | `[<index>]`      |
//! | mapping key    | `[<repr(key)>]`  |

use crate::repr::repr;
use crate::view::Diffable;

/// One step of descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Field(&'a str),
    Index(usize),
    /// A mapping key, already rendered with [`repr`].
    Key(&'a str),
}

/// Append `segment` to `path`.
pub fn extend(path: &str, segment: Segment<'_>) -> String {
    match segment {
        Segment::Field(name) => format!("{path}.{name}"),
        Segment::Index(index) => format!("{path}[{index}]"),
        Segment::Key(rendered) => format!("{path}[{rendered}]"),
    }
}

/// Append the segment for mapping key `key` to `path`.
pub fn extend_key(path: &str, key: &dyn Diffable) -> String {
    extend(path, Segment::Key(&repr(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        assert_eq!(extend("", Segment::Field("last")), ".last");
        assert_eq!(extend("", Segment::Index(2)), "[2]");
    }

    #[test]
    fn segments_chain_left_to_right() {
        let path = extend("", Segment::Field("popup"));
        let path = extend(&path, Segment::Field("menu_item"));
        let path = extend(&path, Segment::Index(0));
        let path = extend(&path, Segment::Field("value"));
        assert_eq!(path, ".popup.menu_item[0].value");
    }

    #[test]
    fn keys_use_the_canonical_representation() {
        assert_eq!(extend_key(".map", &"key1"), ".map[\"key1\"]");
        assert_eq!(extend_key("", &42u8), "[42]");
        assert_eq!(extend_key("", &(1, 'x')), "[(1, 'x')]");
    }
}
