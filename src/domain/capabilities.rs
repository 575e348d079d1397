//! Capability contracts
//!
//! Every platform-dependent capability the app uses is described by one trait
//! here. Both targets implement the same trait so application code never
//! branches on the platform; the resolver picks the implementation once.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::markup::Node;
use super::ShimError;
use crate::services::connectivity::Subscription;

/// Named capability contracts known to the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Contract {
    NetworkStatus,
    SecureHash,
    Gesture,
    Graphics,
    Navigation,
}

impl Contract {
    pub const ALL: [Contract; 5] = [
        Contract::NetworkStatus,
        Contract::SecureHash,
        Contract::Gesture,
        Contract::Graphics,
        Contract::Navigation,
    ];

    /// Module name application code imports the capability by
    pub const fn module_name(&self) -> &'static str {
        match self {
            Contract::NetworkStatus => "netinfo",
            Contract::SecureHash => "secure-hash",
            Contract::Gesture => "gesture-handler",
            Contract::Graphics => "svg",
            Contract::Navigation => "screens",
        }
    }

    /// Map an imported module name to its contract, if it is one we know
    pub fn from_module(name: &str) -> Option<Self> {
        Contract::ALL
            .into_iter()
            .find(|contract| contract.module_name() == name)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.module_name())
    }
}

// ---------------------------------------------------------------------------
// Network status
// ---------------------------------------------------------------------------

/// Coarse link type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    None,
    Unknown,
    Wifi,
    Cellular,
    Ethernet,
}

/// Connectivity snapshot delivered by `fetch` and to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkState {
    pub is_connected: bool,
    pub is_internet_reachable: bool,
    #[serde(rename = "type")]
    pub kind: LinkType,
}

impl NetworkState {
    pub const fn online(kind: LinkType) -> Self {
        Self {
            is_connected: true,
            is_internet_reachable: true,
            kind,
        }
    }

    pub const fn offline() -> Self {
        Self {
            is_connected: false,
            is_internet_reachable: false,
            kind: LinkType::None,
        }
    }
}

/// Callback invoked with every connectivity update
pub type ConnectivityListener = Arc<dyn Fn(&NetworkState) + Send + Sync>;

#[async_trait]
pub trait NetworkStatusProvider: Send + Sync {
    /// Read the current connectivity
    async fn fetch(&self) -> NetworkState;

    /// Register a listener. The current status is pushed to it before this
    /// returns; later changes are delivered until the handle is unsubscribed.
    fn subscribe(&self, listener: ConnectivityListener) -> Subscription;
}

// ---------------------------------------------------------------------------
// Secure hash
// ---------------------------------------------------------------------------

/// Real password hashing. Only native targets provide one.
pub trait SecureHashProvider: Send + Sync {
    /// Hash `data`, with a salt from `gen_salt` or a fresh one when `None`
    fn hash(&self, data: &str, salt: Option<&str>) -> Result<String, ShimError>;

    /// Verify `data` against a hash produced by `hash`
    fn compare(&self, data: &str, encrypted: &str) -> Result<bool, ShimError>;

    fn gen_salt(&self) -> Result<String, ShimError>;
}

// ---------------------------------------------------------------------------
// Gesture / graphics / navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gesture {
    Tap,
    LongPress,
    Pan,
    Swipe,
}

impl Gesture {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Gesture::Tap => "tap",
            Gesture::LongPress => "long-press",
            Gesture::Pan => "pan",
            Gesture::Swipe => "swipe",
        }
    }
}

pub trait GestureProvider: Send + Sync {
    /// Root wrapper every gesture-enabled tree must sit under
    fn root_view(&self, children: Vec<Node>) -> Node;

    /// Attach a gesture recognizer around `children`
    fn detector(&self, gesture: Gesture, children: Vec<Node>) -> Node;

    /// Whether `gesture` is actually recognized on this target
    fn recognizes(&self, gesture: Gesture) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: String,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: String,
    },
    Path {
        d: String,
        stroke: String,
    },
}

pub trait GraphicsProvider: Send + Sync {
    /// Drawing surface holding `children`
    fn canvas(&self, view: ViewBox, children: Vec<Node>) -> Node;

    fn shape(&self, shape: &Shape) -> Node;
}

pub trait NavigationProvider: Send + Sync {
    /// Switch native screen containers on or off. Returns whether native
    /// screens are in effect afterwards.
    fn enable_screens(&self, enabled: bool) -> bool;

    fn screen_container(&self, children: Vec<Node>) -> Node;

    fn screen(&self, name: &str, active: bool, children: Vec<Node>) -> Node;
}
