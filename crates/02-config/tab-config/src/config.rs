use crate::buttons::CustomButtonSpec;
use crate::keys;
use extras::{ActionDispatcher, ActionToken, ExtrasBag, ImageData};
use log::warn;
use smallvec::SmallVec;

/// Upper bound on caller-supplied menu entries; extra entries are dropped
/// silently.
pub const MAX_MENU_ENTRIES: usize = 5;

/// Required pixel edge for a caller-supplied close icon. Anything else is
/// discarded in favor of the built-in icon.
pub const CLOSE_ICON_SIZE_PX: u32 = 48;

/// Toolbar color used when the caller does not supply one.
pub const DEFAULT_TOOLBAR_COLOR: u32 = 0xFFF2_F2F2;

/// Sentinel for "no initial background color was requested".
pub const TRANSPARENT: u32 = 0;

const ALPHA_OPAQUE: u32 = 0xFF00_0000;

/// Whether the request originated from a privileged first-party caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trust {
    FirstParty,
    ThirdParty,
}

impl Trust {
    pub fn is_first_party(self) -> bool {
        matches!(self, Trust::FirstParty)
    }
}

/// The overall UI treatment requested for the tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UiType {
    #[default]
    Default,
    MediaViewer,
    PaymentRequest,
    InfoPage,
    ReaderMode,
}

impl UiType {
    /// Decodes the wire ordinal; unknown values degrade to [`UiType::Default`].
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => UiType::MediaViewer,
            2 => UiType::PaymentRequest,
            3 => UiType::InfoPage,
            4 => UiType::ReaderMode,
            _ => UiType::Default,
        }
    }
}

/// Whether the page title is shown in the toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TitleVisibility {
    #[default]
    Hidden,
    Visible,
}

/// The close-button icon to render: the caller's, if it passed validation,
/// or the built-in default.
#[derive(Clone, Debug, PartialEq)]
pub enum CloseIcon {
    BuiltIn,
    Custom(ImageData),
}

/// A single caller-defined menu entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub title: String,
    pub action: ActionToken,
}

/// Exit-animation resources supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExitAnimation {
    pub package: String,
    pub enter_res: i32,
    pub exit_res: i32,
}

/// Immutable launch configuration for one tab.
///
/// Built exactly once by [`LaunchConfig::from_extras`]; every field that the
/// caller left unset carries its documented default.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchConfig {
    trust: Trust,
    opened_by_host: bool,
    ui_type: UiType,
    toolbar_color: u32,
    bottom_bar_color: u32,
    initial_background_color: u32,
    enable_url_bar_hiding: bool,
    title_visibility: TitleVisibility,
    close_icon: CloseIcon,
    menu_entries: SmallVec<[MenuEntry; MAX_MENU_ENTRIES]>,
    toolbar_button: Option<CustomButtonSpec>,
    bottom_bar_buttons: SmallVec<[CustomButtonSpec; 2]>,
    show_share_item: bool,
    disable_star_button: bool,
    disable_download_button: bool,
    media_viewer_url: Option<String>,
    enable_embedded_media: bool,
    send_to_external_handler: bool,
    exit_animation: Option<ExitAnimation>,
    keep_alive: Option<ExtrasBag>,
}

impl LaunchConfig {
    /// Normalizes `bag` into a configuration. Never fails: malformed fields
    /// fall back to defaults, trust-gated fields are downgraded, oversized
    /// lists are truncated.
    pub fn from_extras(bag: &ExtrasBag, trust: Trust) -> Self {
        let opened_by_host = bag.bool_or(keys::EXTRA_IS_OPENED_BY_HOST, false);
        let requested_ui = UiType::from_i32(bag.int_or(keys::EXTRA_UI_TYPE, 0));
        let ui_type = verified_ui_type(requested_ui, trust, opened_by_host);

        let toolbar_color =
            opaque(bag.int_or(keys::EXTRA_TOOLBAR_COLOR, DEFAULT_TOOLBAR_COLOR as i32) as u32);
        let bottom_bar_color = opaque(
            bag.int_or(keys::EXTRA_SECONDARY_TOOLBAR_COLOR, toolbar_color as i32) as u32,
        );
        let initial_background_color =
            initial_background(bag.int_or(keys::EXTRA_INITIAL_BACKGROUND_COLOR, 0) as u32);

        let (toolbar_button, bottom_bar_buttons) = split_custom_buttons(bag);

        Self {
            trust,
            opened_by_host,
            ui_type,
            toolbar_color,
            bottom_bar_color,
            initial_background_color,
            enable_url_bar_hiding: bag.bool_or(keys::EXTRA_ENABLE_URL_BAR_HIDING, true),
            title_visibility: title_visibility(bag.int_or(keys::EXTRA_TITLE_VISIBILITY, 0)),
            close_icon: close_icon(bag),
            menu_entries: menu_entries(bag),
            toolbar_button,
            bottom_bar_buttons,
            show_share_item: bag.bool_or(keys::EXTRA_DEFAULT_SHARE_ITEM, false),
            disable_star_button: bag.bool_or(keys::EXTRA_DISABLE_STAR_BUTTON, false),
            disable_download_button: bag.bool_or(keys::EXTRA_DISABLE_DOWNLOAD_BUTTON, false),
            media_viewer_url: if ui_type == UiType::MediaViewer {
                bag.str_opt(keys::EXTRA_MEDIA_VIEWER_URL).map(str::to_owned)
            } else {
                None
            },
            enable_embedded_media: trust.is_first_party()
                && bag.bool_or(keys::EXTRA_ENABLE_EMBEDDED_MEDIA, false),
            send_to_external_handler: bag.bool_or(keys::EXTRA_SEND_TO_EXTERNAL_HANDLER, false),
            exit_animation: exit_animation(bag),
            keep_alive: bag.bag_opt(keys::EXTRA_KEEP_ALIVE).cloned(),
        }
    }

    pub fn trust(&self) -> Trust {
        self.trust
    }

    /// Whether the launching intent came from another surface of the host
    /// application itself.
    pub fn is_opened_by_host(&self) -> bool {
        self.opened_by_host
    }

    pub fn ui_type(&self) -> UiType {
        self.ui_type
    }

    pub fn is_media_viewer(&self) -> bool {
        self.ui_type == UiType::MediaViewer
    }

    pub fn is_info_page(&self) -> bool {
        self.ui_type == UiType::InfoPage
    }

    /// Toolbar color with alpha forced fully opaque.
    pub fn toolbar_color(&self) -> u32 {
        self.toolbar_color
    }

    /// Bottom-bar color; defaults to the toolbar color when unset.
    pub fn bottom_bar_color(&self) -> u32 {
        self.bottom_bar_color
    }

    /// Initial background color, or [`TRANSPARENT`] when the caller set none.
    pub fn initial_background_color(&self) -> u32 {
        self.initial_background_color
    }

    pub fn should_enable_url_bar_hiding(&self) -> bool {
        self.enable_url_bar_hiding
    }

    pub fn title_visibility(&self) -> TitleVisibility {
        self.title_visibility
    }

    pub fn close_icon(&self) -> &CloseIcon {
        &self.close_icon
    }

    pub fn menu_entries(&self) -> &[MenuEntry] {
        &self.menu_entries
    }

    pub fn menu_titles(&self) -> Vec<&str> {
        self.menu_entries
            .iter()
            .map(|entry| entry.title.as_str())
            .collect()
    }

    pub fn toolbar_button(&self) -> Option<&CustomButtonSpec> {
        self.toolbar_button.as_ref()
    }

    pub fn bottom_bar_buttons(&self) -> &[CustomButtonSpec] {
        &self.bottom_bar_buttons
    }

    pub fn should_show_bottom_bar(&self) -> bool {
        !self.bottom_bar_buttons.is_empty()
    }

    /// All custom buttons regardless of placement, toolbar button first.
    pub fn button_for_id(&self, id: i32) -> Option<&CustomButtonSpec> {
        self.toolbar_button
            .iter()
            .chain(self.bottom_bar_buttons.iter())
            .find(|button| button.id == id)
    }

    pub fn should_show_share_item(&self) -> bool {
        self.show_share_item
    }

    pub fn should_show_star_button(&self) -> bool {
        !self.disable_star_button
    }

    pub fn should_show_download_button(&self) -> bool {
        !self.disable_download_button
    }

    pub fn media_viewer_url(&self) -> Option<&str> {
        self.media_viewer_url.as_deref()
    }

    pub fn should_enable_embedded_media(&self) -> bool {
        self.enable_embedded_media
    }

    pub fn should_send_to_external_handler(&self) -> bool {
        self.send_to_external_handler
    }

    pub fn should_animate_on_finish(&self) -> bool {
        self.exit_animation.is_some()
    }

    pub fn exit_animation(&self) -> Option<&ExitAnimation> {
        self.exit_animation.as_ref()
    }

    pub fn keep_alive(&self) -> Option<&ExtrasBag> {
        self.keep_alive.as_ref()
    }

    /// Sends the action recorded for menu entry `index`, attaching `url`.
    ///
    /// Out-of-range indices and delivery failures are logged and swallowed;
    /// the caller is never informed. The tab must keep working even when the
    /// owning process has gone away.
    pub fn dispatch_menu_action(&self, index: usize, url: &str, dispatcher: &dyn ActionDispatcher) {
        let Some(entry) = self.menu_entries.get(index) else {
            warn!("menu action index {index} out of range");
            return;
        };
        if let Err(err) = dispatcher.send(entry.action, Some(url)) {
            warn!("failed to send menu action {:?}: {err}", entry.action);
        }
    }

    /// Sends the toolbar button's action with `url` attached, if a toolbar
    /// button exists. Failures are logged and swallowed.
    pub fn dispatch_toolbar_action(&self, url: &str, dispatcher: &dyn ActionDispatcher) {
        let Some(button) = self.toolbar_button.as_ref() else {
            return;
        };
        if let Err(err) = dispatcher.send(button.action, Some(url)) {
            warn!("failed to send toolbar action {:?}: {err}", button.action);
        }
    }
}

/// Applies the trust gate to the requested UI type.
///
/// Third-party callers always get [`UiType::Default`]; the payment surface
/// additionally requires that the host itself opened the tab.
fn verified_ui_type(requested: UiType, trust: Trust, opened_by_host: bool) -> UiType {
    if !trust.is_first_party() {
        if requested != UiType::Default {
            warn!("third-party caller requested {requested:?}; downgrading to default UI");
        }
        return UiType::Default;
    }
    if requested == UiType::PaymentRequest && !opened_by_host {
        return UiType::Default;
    }
    requested
}

fn opaque(color: u32) -> u32 {
    color | ALPHA_OPAQUE
}

fn initial_background(color: u32) -> u32 {
    if color == TRANSPARENT {
        TRANSPARENT
    } else {
        opaque(color)
    }
}

fn title_visibility(value: i32) -> TitleVisibility {
    match value {
        1 => TitleVisibility::Visible,
        _ => TitleVisibility::Hidden,
    }
}

fn close_icon(bag: &ExtrasBag) -> CloseIcon {
    match bag.image_opt(keys::EXTRA_CLOSE_BUTTON_ICON) {
        Some(image) if image.is_square_of(CLOSE_ICON_SIZE_PX) => CloseIcon::Custom(image.clone()),
        Some(image) => {
            warn!(
                "discarding close icon with dimensions {}x{}; expected {CLOSE_ICON_SIZE_PX}px square",
                image.width, image.height
            );
            CloseIcon::BuiltIn
        }
        None => CloseIcon::BuiltIn,
    }
}

/// Keeps the first [`MAX_MENU_ENTRIES`] valid entries in caller order.
/// Entries with an empty title or a missing action are dropped, not errors.
fn menu_entries(bag: &ExtrasBag) -> SmallVec<[MenuEntry; MAX_MENU_ENTRIES]> {
    let mut entries = SmallVec::new();
    for item in bag.bag_list(keys::EXTRA_MENU_ITEMS) {
        if entries.len() == MAX_MENU_ENTRIES {
            break;
        }
        let title = bag_title(item);
        let Some(action) = item.action_opt(keys::KEY_MENU_ACTION) else {
            continue;
        };
        let Some(title) = title else {
            continue;
        };
        entries.push(MenuEntry { title, action });
    }
    entries
}

fn bag_title(bag: &ExtrasBag) -> Option<String> {
    match bag.str_opt(keys::KEY_MENU_TITLE) {
        Some(title) if !title.is_empty() => Some(title.to_owned()),
        _ => None,
    }
}

/// Splits caller buttons into at most one toolbar button (last one wins) and
/// the remainder on the bottom bar.
fn split_custom_buttons(
    bag: &ExtrasBag,
) -> (Option<CustomButtonSpec>, SmallVec<[CustomButtonSpec; 2]>) {
    let mut toolbar = None;
    let mut bottom = SmallVec::new();
    for item in bag.bag_list(keys::EXTRA_CUSTOM_BUTTONS) {
        let Some(spec) = CustomButtonSpec::from_bag(item) else {
            continue;
        };
        if spec.on_toolbar {
            toolbar = Some(spec);
        } else {
            bottom.push(spec);
        }
    }
    (toolbar, bottom)
}

fn exit_animation(bag: &ExtrasBag) -> Option<ExitAnimation> {
    let animation = bag.bag_opt(keys::EXTRA_EXIT_ANIMATION)?;
    let package = animation.str_opt(keys::KEY_ANIMATION_PACKAGE)?;
    if package.is_empty() {
        return None;
    }
    Some(ExitAnimation {
        package: package.to_owned(),
        enter_res: animation.int_or(keys::KEY_ANIMATION_ENTER_RES, 0),
        exit_res: animation.int_or(keys::KEY_ANIMATION_EXIT_RES, 0),
    })
}
