//! Well-known extras-bag keys understood by the launch configuration parser.

pub const EXTRA_UI_TYPE: &str = "tabshell.extra.ui_type";
pub const EXTRA_TOOLBAR_COLOR: &str = "tabshell.extra.toolbar_color";
pub const EXTRA_SECONDARY_TOOLBAR_COLOR: &str = "tabshell.extra.secondary_toolbar_color";
pub const EXTRA_INITIAL_BACKGROUND_COLOR: &str = "tabshell.extra.initial_background_color";
pub const EXTRA_ENABLE_URL_BAR_HIDING: &str = "tabshell.extra.enable_url_bar_hiding";
pub const EXTRA_TITLE_VISIBILITY: &str = "tabshell.extra.title_visibility";
pub const EXTRA_CLOSE_BUTTON_ICON: &str = "tabshell.extra.close_button_icon";
pub const EXTRA_MENU_ITEMS: &str = "tabshell.extra.menu_items";
pub const EXTRA_CUSTOM_BUTTONS: &str = "tabshell.extra.custom_buttons";
pub const EXTRA_DEFAULT_SHARE_ITEM: &str = "tabshell.extra.default_share_item";
pub const EXTRA_DISABLE_STAR_BUTTON: &str = "tabshell.extra.disable_star_button";
pub const EXTRA_DISABLE_DOWNLOAD_BUTTON: &str = "tabshell.extra.disable_download_button";
pub const EXTRA_MEDIA_VIEWER_URL: &str = "tabshell.extra.media_viewer_url";
pub const EXTRA_ENABLE_EMBEDDED_MEDIA: &str = "tabshell.extra.enable_embedded_media";
pub const EXTRA_SEND_TO_EXTERNAL_HANDLER: &str = "tabshell.extra.send_to_external_handler";
pub const EXTRA_IS_OPENED_BY_HOST: &str = "tabshell.extra.is_opened_by_host";
pub const EXTRA_EXIT_ANIMATION: &str = "tabshell.extra.exit_animation";
pub const EXTRA_KEEP_ALIVE: &str = "tabshell.extra.keep_alive";

/// Keys inside a single menu-item bag.
pub const KEY_MENU_TITLE: &str = "title";
pub const KEY_MENU_ACTION: &str = "action";

/// Keys inside a single custom-button bag.
pub const KEY_BUTTON_ID: &str = "id";
pub const KEY_BUTTON_DESCRIPTION: &str = "description";
pub const KEY_BUTTON_ICON: &str = "icon";
pub const KEY_BUTTON_ACTION: &str = "action";
pub const KEY_BUTTON_ON_TOOLBAR: &str = "on_toolbar";

/// Keys inside the exit-animation bag.
pub const KEY_ANIMATION_PACKAGE: &str = "package";
pub const KEY_ANIMATION_ENTER_RES: &str = "enter_res";
pub const KEY_ANIMATION_EXIT_RES: &str = "exit_res";
