//! Registry of user-visible notification channels.
//!
//! Channels appear in system UI and are persisted by the platform, so the
//! active set evolves append-only: a channel is never redefined in place, and
//! a removed channel's id moves to the legacy list so it can be cleaned up on
//! upgrade and is never reused for a new channel.

use serde::Serialize;
use std::collections::HashMap;

pub const CHANNEL_ID_BROWSER: &str = "browser";
pub const CHANNEL_ID_DOWNLOADS: &str = "downloads";
pub const CHANNEL_ID_INCOGNITO: &str = "incognito";
pub const CHANNEL_ID_MEDIA: &str = "media";
pub const CHANNEL_ID_SITES: &str = "sites";

pub const GROUP_ID_GENERAL: &str = "general";
pub const GROUP_ID_SITES: &str = "sites";

/// Version of the active channel set. Must be bumped by hand whenever the set
/// returned by [`ChannelRegistry::startup_ids`] or [`ChannelRegistry::legacy_ids`]
/// changes.
pub const CHANNELS_VERSION: u32 = 0;

/// Identifier of a notification channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a channel group.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GroupId(pub String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Relative prominence the platform gives notifications on a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Importance {
    Min,
    Low,
    Default,
    High,
}

/// Display metadata for one channel. `name_res` is a resource key resolved by
/// the embedding shell at render time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChannelDescriptor {
    pub id: ChannelId,
    pub name_res: &'static str,
    pub importance: Importance,
    pub group: GroupId,
}

/// Display metadata for one channel group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChannelGroup {
    pub id: GroupId,
    pub name_res: &'static str,
}

/// Immutable channel table built once at process startup.
pub struct ChannelRegistry {
    channels: HashMap<ChannelId, ChannelDescriptor>,
    groups: HashMap<GroupId, ChannelGroup>,
    startup: Vec<ChannelId>,
    legacy: Vec<ChannelId>,
}

impl ChannelRegistry {
    /// Builds the predefined table.
    ///
    /// Every id listed in `startup` has a descriptor here. Removing an entry
    /// requires adding its id to the legacy list and bumping
    /// [`CHANNELS_VERSION`].
    pub fn built_in() -> Self {
        let descriptors = vec![
            ChannelDescriptor {
                id: ChannelId::new(CHANNEL_ID_BROWSER),
                name_res: "notification_category_browser",
                importance: Importance::Low,
                group: GroupId::new(GROUP_ID_GENERAL),
            },
            ChannelDescriptor {
                id: ChannelId::new(CHANNEL_ID_DOWNLOADS),
                name_res: "notification_category_downloads",
                importance: Importance::Low,
                group: GroupId::new(GROUP_ID_GENERAL),
            },
            ChannelDescriptor {
                id: ChannelId::new(CHANNEL_ID_INCOGNITO),
                name_res: "notification_category_incognito",
                importance: Importance::Low,
                group: GroupId::new(GROUP_ID_GENERAL),
            },
            ChannelDescriptor {
                id: ChannelId::new(CHANNEL_ID_MEDIA),
                name_res: "notification_category_media",
                importance: Importance::Low,
                group: GroupId::new(GROUP_ID_GENERAL),
            },
            ChannelDescriptor {
                id: ChannelId::new(CHANNEL_ID_SITES),
                name_res: "notification_category_sites",
                importance: Importance::Default,
                group: GroupId::new(GROUP_ID_GENERAL),
            },
        ];

        let groups = vec![
            ChannelGroup {
                id: GroupId::new(GROUP_ID_GENERAL),
                name_res: "notification_category_group_general",
            },
            ChannelGroup {
                id: GroupId::new(GROUP_ID_SITES),
                name_res: "notification_category_sites",
            },
        ];

        Self::from_parts(descriptors, groups, Vec::new())
    }

    fn from_parts(
        descriptors: Vec<ChannelDescriptor>,
        groups: Vec<ChannelGroup>,
        legacy: Vec<ChannelId>,
    ) -> Self {
        let startup = descriptors.iter().map(|d| d.id.clone()).collect();
        let channels = descriptors
            .into_iter()
            .map(|d| (d.id.clone(), d))
            .collect();
        let groups = groups.into_iter().map(|g| (g.id.clone(), g)).collect();
        Self {
            channels,
            groups,
            startup,
            legacy,
        }
    }

    /// Looks up the descriptor for an active channel.
    pub fn channel(&self, id: &ChannelId) -> Option<&ChannelDescriptor> {
        self.channels.get(id)
    }

    pub fn group(&self, id: &GroupId) -> Option<&ChannelGroup> {
        self.groups.get(id)
    }

    pub fn group_for(&self, descriptor: &ChannelDescriptor) -> Option<&ChannelGroup> {
        self.group(&descriptor.group)
    }

    /// Ids of channels to register on startup.
    pub fn startup_ids(&self) -> &[ChannelId] {
        &self.startup
    }

    /// Retired ids, consulted only when deleting stale channels on upgrade.
    pub fn legacy_ids(&self) -> &[ChannelId] {
        &self.legacy
    }

    pub fn is_retired(&self, id: &ChannelId) -> bool {
        self.legacy.contains(id)
    }
}
