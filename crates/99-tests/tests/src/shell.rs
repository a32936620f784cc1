//! End-to-end slice: parse a hostile launch request, wire its download
//! surface to the notification stack, and exercise the suggestions bridge.

use bridge::{SiteSuggestion, TopSitesBridge, TopSitesDelegate};
use channels::{ChannelId, ChannelRegistry, CHANNEL_ID_DOWNLOADS};
use extras::{ActionToken, ExtraValue, ExtrasBag};
use mock::{make_hub_with_delay, NotifyEvent};
use notify::{EntityId, Progress};
use std::num::NonZeroU64;
use std::sync::Arc;
use tab_config::{keys, LaunchConfig, Trust, UiType};

#[test]
fn hostile_launch_request_degrades_to_safe_defaults() {
    // A third-party bag that lies about everything it can.
    let bag = ExtrasBag::new()
        .with_int(keys::EXTRA_UI_TYPE, 2)
        .with_bool(keys::EXTRA_IS_OPENED_BY_HOST, true)
        .with_bool(keys::EXTRA_ENABLE_EMBEDDED_MEDIA, true)
        .with_str(keys::EXTRA_TOOLBAR_COLOR, "not-a-color")
        .with_value_list(
            keys::EXTRA_MENU_ITEMS,
            vec![ExtraValue::Int(1), ExtraValue::Bool(false)],
        );

    let config = LaunchConfig::from_extras(&bag, Trust::ThirdParty);

    assert_eq!(config.ui_type(), UiType::Default);
    assert!(!config.should_enable_embedded_media());
    assert_eq!(config.toolbar_color() >> 24, 0xFF);
    assert!(config.menu_entries().is_empty());
    assert!(config.should_show_download_button());
}

#[test]
fn download_surface_reports_through_downloads_channel() {
    let registry = ChannelRegistry::built_in();
    let channel = registry
        .channel(&ChannelId::new(CHANNEL_ID_DOWNLOADS))
        .expect("downloads channel is predefined");
    assert_eq!(channel.group.as_str(), "general");

    // Progress for a download started from the tab flows through the hub.
    let (hub, notifier, clock) = make_hub_with_delay(500);
    let id = EntityId::new("guid-0001");

    hub.submit_progress(&id, Progress::percent(10));
    clock.advance(5);
    hub.submit_progress(&id, Progress::percent(60));
    hub.complete(&id).expect("download is live");

    assert_eq!(
        notifier.take_events(),
        vec![
            NotifyEvent::Progress(id.clone(), Progress::percent(10)),
            NotifyEvent::Progress(id.clone(), Progress::percent(60)),
            NotifyEvent::Succeeded(id),
        ]
    );
}

struct StaticSites;

impl TopSitesDelegate for StaticSites {
    fn query_sites(&self, _raw: u64, limit: usize) -> Vec<SiteSuggestion> {
        [("news", "https://news.example"), ("docs", "https://docs.example")]
            .into_iter()
            .take(limit)
            .map(|(title, url)| SiteSuggestion {
                title: title.to_owned(),
                url: url.to_owned(),
            })
            .collect()
    }

    fn record_opened(&self, _raw: u64, _url: &str) {}
}

#[test]
fn suggestions_bridge_survives_teardown_order() {
    let bridge = TopSitesBridge::new(
        NonZeroU64::new(0xCAFE).expect("nonzero"),
        Arc::new(StaticSites),
    );

    let sites = bridge.refresh(10).expect("bridge is live");
    assert_eq!(sites.len(), 2);

    bridge.destroy();
    assert!(
        bridge.refresh(10).is_err(),
        "refresh after destroy must be rejected, not crash"
    );
}

#[test]
fn action_tokens_round_trip_through_nested_bags() {
    let item = ExtrasBag::new()
        .with_str(keys::KEY_MENU_TITLE, "Open in app")
        .with_action(keys::KEY_MENU_ACTION, ActionToken(42));
    let bag = ExtrasBag::new().with_value_list(keys::EXTRA_MENU_ITEMS, vec![ExtraValue::Bag(item)]);

    let config = LaunchConfig::from_extras(&bag, Trust::ThirdParty);
    assert_eq!(config.menu_titles(), vec!["Open in app"]);
    assert_eq!(config.menu_entries()[0].action, ActionToken(42));
}
