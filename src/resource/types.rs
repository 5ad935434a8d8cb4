//! The closed set of resource types.

use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Kind of a resource, the middle component of `package:type/entry`.
///
/// The string forms are the ones used in resource names and in the `res/` directory layout.
/// `^attr-private` is the internal type attributes are moved to when they are declared
/// private to a package.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
pub enum ResourceType {
    #[strum(serialize = "anim")]
    Anim,
    #[strum(serialize = "animator")]
    Animator,
    #[strum(serialize = "array")]
    Array,
    #[strum(serialize = "attr")]
    Attr,
    #[strum(serialize = "^attr-private")]
    AttrPrivate,
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "color")]
    Color,
    #[strum(serialize = "configVarying")]
    ConfigVarying,
    #[strum(serialize = "dimen")]
    Dimen,
    #[strum(serialize = "drawable")]
    Drawable,
    #[strum(serialize = "font")]
    Font,
    #[strum(serialize = "fraction")]
    Fraction,
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "integer")]
    Integer,
    #[strum(serialize = "interpolator")]
    Interpolator,
    #[strum(serialize = "layout")]
    Layout,
    #[strum(serialize = "macro")]
    Macro,
    #[strum(serialize = "menu")]
    Menu,
    #[strum(serialize = "mipmap")]
    Mipmap,
    #[strum(serialize = "navigation")]
    Navigation,
    #[strum(serialize = "plurals")]
    Plurals,
    #[strum(serialize = "raw")]
    Raw,
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "style")]
    Style,
    #[strum(serialize = "styleable")]
    Styleable,
    #[strum(serialize = "transition")]
    Transition,
    #[strum(serialize = "xml")]
    Xml,
}

impl ResourceType {
    /// Returns the type for its textual form, or `None` for unknown types.
    pub fn parse(s: &str) -> Option<ResourceType> {
        s.parse().ok()
    }

    /// Returns the textual form of this type.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
