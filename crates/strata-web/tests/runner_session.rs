#![forbid(unsafe_code)]

//! Native run of the browser start-up sequence: preload, first frame, then
//! checkbox toggles with the control sync a host performs afterwards.

use futures::executor::block_on;
use futures::future::{FutureExt, LocalBoxFuture, ready};
use pretty_assertions::assert_eq;
use strata_core::{AttributeTag, CompositorConfig};
use strata_runtime::{AssetError, AssetLoader, RecordingSurface, preload};
use strata_web::RunnerCore;
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

struct PathLoader;

impl AssetLoader for PathLoader {
    type Image = String;

    fn load<'a>(&'a self, source: &'a str) -> LocalBoxFuture<'a, Result<String, AssetError>> {
        ready(Ok(source.to_owned())).boxed_local()
    }
}

fn started() -> RunnerCore<RecordingSurface> {
    let config = CompositorConfig::builtin().unwrap();
    let sources = config.catalog.asset_sources();
    let assets = block_on(preload(&PathLoader, &sources));
    assert_eq!(assets.len(), 15);
    let mut core = RunnerCore::new(&config, RecordingSurface::new(), assets);
    core.init();
    core
}

fn checked(core: &RunnerCore<RecordingSurface>) -> Vec<String> {
    core.toggle_views()
        .into_iter()
        .filter(|v| v.active)
        .map(|v| v.tag.to_string())
        .collect()
}

#[test]
fn start_shows_initial_checkbox_state() {
    init_tracing();
    let core = started();
    assert_eq!(checked(&core), vec!["Tarasenko"]);
    assert_eq!(core.toggle_views().len(), 11);
    assert!(core.last_report().is_some_and(|r| r.complete()));
}

#[test]
fn base_switch_unchecks_pruned_boxes() {
    init_tracing();
    let mut core = started();
    core.toggle("Drach", true);
    core.toggle("Skorik", true);
    assert_eq!(checked(&core), vec!["Tarasenko", "Drach", "Skorik"]);

    core.toggle("Jaivoronok", true);

    assert_eq!(
        core.take_pruned(),
        vec![AttributeTag::from("Drach"), AttributeTag::from("Skorik")]
    );
    assert_eq!(checked(&core), vec!["Tarasenko", "Jaivoronok"]);
    let views = core.toggle_views();
    let drach = views.iter().find(|v| v.tag.as_str() == "Drach").unwrap();
    assert_eq!(drach.style.background, "rgba(65, 145, 141, 0.5)");
    assert_eq!(
        core.take_logs().last().map(String::as_str),
        Some("Changed base to: Base_4")
    );
}

#[test]
fn wheel_then_drag_redraws_each_time() {
    let mut core = started();
    assert!(core.wheel(100.0, 100.0, -1.0).rendered);
    assert!(!core.pointer_down(10.0, 10.0).rendered);
    assert!(core.pointer_move(20.0, 10.0).rendered);
    core.pointer_leave();
    assert_eq!(core.frame_idx(), 3);
    assert!((core.compositor().view().scale - 0.27).abs() < 1e-9);
}
