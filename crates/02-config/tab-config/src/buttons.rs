use crate::keys;
use extras::{ActionToken, ExtrasBag, ImageData};

/// One caller-supplied action button, shown either on the toolbar or on the
/// bottom bar.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomButtonSpec {
    pub id: i32,
    pub description: String,
    pub icon: ImageData,
    pub action: ActionToken,
    pub on_toolbar: bool,
}

impl CustomButtonSpec {
    /// Parses a single button bag. Buttons without an icon or an action are
    /// unusable and yield `None`; everything else defaults.
    pub(crate) fn from_bag(bag: &ExtrasBag) -> Option<Self> {
        let icon = bag.image_opt(keys::KEY_BUTTON_ICON)?.clone();
        let action = bag.action_opt(keys::KEY_BUTTON_ACTION)?;
        Some(Self {
            id: bag.int_or(keys::KEY_BUTTON_ID, 0),
            description: bag.string_or(keys::KEY_BUTTON_DESCRIPTION, ""),
            icon,
            action,
            on_toolbar: bag.bool_or(keys::KEY_BUTTON_ON_TOOLBAR, false),
        })
    }
}
