use fcschool::config::Config;
use fcschool::domain::{
    BuildError, Contract, Gesture, NetworkState, NetworkStatusProvider, Node, PlatformTarget,
    Shape, ShimError, ViewBox,
};
use fcschool::resolver::{ResolutionTable, TargetPair};
use fcschool::services::{hash_password, verify_password};
use fcschool::shims::{NativeGestures, NativeNetworkStatus, WebNetworkStatus};
use fcschool::APP_IMPORTS;
use std::sync::{Arc, Mutex};

fn test_config() -> Config {
    Config {
        port: 0,
        dist_dir: "dist".into(),
        entry_document: "index.html".to_string(),
        target: PlatformTarget::Web,
        connectivity_probe: "127.0.0.1:9".to_string(),
        connectivity_interval: std::time::Duration::from_secs(30),
    }
}

// Helper to build a table whose web network provider the test can drive
fn table_with_browser(online: bool) -> (ResolutionTable, Arc<WebNetworkStatus>) {
    let browser = Arc::new(WebNetworkStatus::new(online));
    let mut table = ResolutionTable::standard(&test_config());
    let native: Arc<dyn NetworkStatusProvider> = Arc::new(NativeNetworkStatus::new("127.0.0.1:9"));
    let web: Arc<dyn NetworkStatusProvider> = browser.clone();
    table.network = TargetPair::both(native, web);
    (table, browser)
}

#[tokio::test]
async fn test_resolved_netinfo_reports_browser_state() {
    let (table, browser) = table_with_browser(true);
    let build = table.resolve(PlatformTarget::Web, APP_IMPORTS).unwrap();
    let netinfo = build.network().unwrap();

    let online = serde_json::to_value(netinfo.fetch().await).unwrap();
    assert_eq!(online["isConnected"], true);
    assert_eq!(online["isInternetReachable"], true);

    browser.set_online(false);
    let offline = serde_json::to_value(netinfo.fetch().await).unwrap();
    assert_eq!(offline["isConnected"], false);
    assert_eq!(offline["isInternetReachable"], false);
}

#[tokio::test]
async fn test_subscribers_fan_out_and_unsubscribe_independently() {
    let (table, browser) = table_with_browser(false);
    let build = table.resolve(PlatformTarget::Web, &["netinfo"]).unwrap();
    let netinfo = build.network().unwrap();

    let log: Arc<Mutex<Vec<(&'static str, bool)>>> = Arc::new(Mutex::new(Vec::new()));
    let listener = |name: &'static str| {
        let log = Arc::clone(&log);
        Arc::new(move |s: &NetworkState| log.lock().unwrap().push((name, s.is_connected)))
    };

    let coach = netinfo.subscribe(listener("coach"));
    let parent = netinfo.subscribe(listener("parent"));
    // Initial state arrives on subscription, before any change
    assert_eq!(
        *log.lock().unwrap(),
        vec![("coach", false), ("parent", false)]
    );

    browser.set_online(true);
    parent.unsubscribe();
    browser.set_online(false);

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            ("coach", false),
            ("parent", false),
            ("coach", true),
            ("parent", true),
            ("coach", false),
        ]
    );
    assert!(coach.is_active());
    coach.unsubscribe();
}

#[test]
fn test_web_build_cannot_verify_credentials() {
    let table = ResolutionTable::standard(&test_config());
    let build = table.resolve(PlatformTarget::Web, APP_IMPORTS).unwrap();
    let hash = build.hash().unwrap();

    assert!(matches!(
        hash_password(hash, "academy2024"),
        Err(ShimError::InsecureTarget { .. })
    ));
    assert!(matches!(
        verify_password(hash, "academy2024", "academy2024"),
        Err(ShimError::InsecureTarget { .. })
    ));
    assert!(matches!(
        hash.hash("academy2024"),
        Err(ShimError::CapabilityUnavailable { .. })
    ));
}

#[test]
fn test_native_build_verifies_credentials() {
    let table = ResolutionTable::standard(&test_config());
    let build = table.resolve(PlatformTarget::Native, APP_IMPORTS).unwrap();
    let hash = build.hash().unwrap();

    let stored = hash_password(hash, "academy2024").unwrap();
    assert!(verify_password(hash, "academy2024", &stored).unwrap());
}

#[test]
fn test_components_keep_children_on_both_targets() {
    let table = ResolutionTable::standard(&test_config());
    let children = vec![Node::text("Match day: Saturday 10:00")];

    for target in [PlatformTarget::Native, PlatformTarget::Web] {
        let build = table.resolve(target, APP_IMPORTS).unwrap();

        let gesture = build.gesture().unwrap();
        let card = gesture.detector(Gesture::Tap, children.clone());
        assert_eq!(card.children(), children.as_slice());

        let nav = build.navigation().unwrap();
        let screen = nav.screen("schedule", true, children.clone());
        assert_eq!(screen.children(), children.as_slice());

        let graphics = build.graphics().unwrap();
        let dot = graphics.shape(&Shape::Circle {
            cx: 4.0,
            cy: 4.0,
            r: 4.0,
            fill: "green".to_string(),
        });
        let icon = graphics.canvas(
            ViewBox {
                width: 8.0,
                height: 8.0,
            },
            vec![dot.clone()],
        );
        assert_eq!(icon.children(), &[dot]);
    }
}

#[test]
fn test_missing_web_shim_fails_before_linking() {
    let mut table = ResolutionTable::standard(&test_config());
    table.gesture = TargetPair::native_only(Arc::new(NativeGestures));

    let err = table
        .resolve(PlatformTarget::Web, APP_IMPORTS)
        .err()
        .expect("resolution must fail");
    assert_eq!(
        err,
        BuildError::MissingImplementation {
            target: PlatformTarget::Web,
            contracts: vec![Contract::Gesture],
        }
    );
    assert!(err.to_string().contains("gesture-handler"));
}
