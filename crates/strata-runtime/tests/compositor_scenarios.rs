#![forbid(unsafe_code)]

//! End-to-end compositor scenarios: preload through a fake loader, then
//! drive the program with host messages and check the recorded draw calls.

use futures::executor::block_on;
use futures::future::{FutureExt, LocalBoxFuture, ready};
use pretty_assertions::assert_eq;
use strata_core::{AttributeTag, CompositorConfig};
use strata_runtime::simulator::{CmdRecord, ProgramSimulator};
use strata_runtime::{
    AssetError, AssetLoader, AssetStore, Compositor, DrawOp, Msg, Program, RecordingSurface,
    ViewTransform, preload,
};
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

/// Resolves every source to its own path, except the listed ones.
struct FakeLoader {
    missing: Vec<&'static str>,
}

impl AssetLoader for FakeLoader {
    type Image = String;

    fn load<'a>(&'a self, source: &'a str) -> LocalBoxFuture<'a, Result<String, AssetError>> {
        let result = if self.missing.iter().any(|m| *m == source) {
            Err(AssetError::new(source, "not found"))
        } else {
            Ok(source.to_owned())
        };
        ready(result).boxed_local()
    }
}

fn loaded(config: &CompositorConfig, missing: Vec<&'static str>) -> AssetStore<String> {
    let sources = config.catalog.asset_sources();
    block_on(preload(&FakeLoader { missing }, &sources))
}

fn program(config: &CompositorConfig) -> Program<Compositor, RecordingSurface> {
    Program::new(
        Compositor::from_config(config),
        RecordingSurface::new(),
        loaded(config, Vec::new()),
    )
}

fn start_view(config: &CompositorConfig) -> ViewTransform {
    ViewTransform::from_config(&config.view)
}

#[test]
fn first_frame_draws_initial_base_and_overlay() {
    init_tracing();
    let config = CompositorConfig::builtin().unwrap();
    let mut p = program(&config);

    let result = p.init();

    assert!(result.rendered);
    assert_eq!(
        p.surface().ops(),
        &[
            DrawOp::Clear,
            DrawOp::Transform(start_view(&config)),
            DrawOp::Image("./img/Base_1.svg".into()),
            DrawOp::Image("./img/Tarasenko.svg".into()),
            DrawOp::Reset,
        ]
    );
    assert!(p.take_logs().is_empty());
}

#[test]
fn walkthrough_switches_bases_and_prunes() {
    init_tracing();
    let config = CompositorConfig::builtin().unwrap();
    let mut p = program(&config);
    p.init();

    p.dispatch(Msg::toggle("Drach", true));
    p.dispatch(Msg::toggle("Skorik", true));
    p.surface_mut().take_ops();
    let result = p.dispatch(Msg::toggle("Jaivoronok", true));

    assert!(result.rendered);
    assert_eq!(result.frame_idx, 4);
    assert_eq!(
        p.surface().images(),
        vec![
            "./img/Base_4.svg",
            "./img/Tarasenko.svg",
            "./img/Jaivoronok.svg"
        ]
    );
    assert_eq!(
        p.take_logs(),
        vec![
            "Changed base to: Base_2".to_string(),
            "Changed base to: Base_3".to_string(),
            "Changed base to: Base_4".to_string(),
        ]
    );
    assert_eq!(
        p.model_mut().take_pruned(),
        vec![AttributeTag::from("Drach"), AttributeTag::from("Skorik")]
    );
    assert!(p.model().selection().is_consistent(p.model().catalog()));
}

#[test]
fn deactivating_everything_keeps_last_base() {
    let config = CompositorConfig::builtin().unwrap();
    let mut p = program(&config);
    p.init();
    p.dispatch(Msg::toggle("Pris", true));
    assert_eq!(p.model().selection().current_base().as_str(), "Base_3");

    p.dispatch(Msg::toggle("Pris", false));
    p.dispatch(Msg::toggle("Tarasenko", false));
    p.surface_mut().take_ops();
    p.redraw();

    assert_eq!(p.model().selection().current_base().as_str(), "Base_3");
    assert_eq!(p.surface().images(), vec!["./img/Base_3.svg"]);
}

#[test]
fn failed_assets_are_skipped_not_fatal() {
    init_tracing();
    let config = CompositorConfig::builtin().unwrap();
    let assets = loaded(&config, vec!["./img/Tarasenko.svg"]);
    assert_eq!(assets.failures().len(), 1);
    let mut p = Program::new(Compositor::from_config(&config), RecordingSurface::new(), assets);

    p.init();

    assert_eq!(p.surface().images(), vec!["./img/Base_1.svg"]);
    let report = p.last_report().cloned().unwrap_or_default();
    assert_eq!(report.skipped, vec!["./img/Tarasenko.svg".to_string()]);
}

#[test]
fn zoom_and_drag_reach_the_surface_transform() {
    let config = CompositorConfig::builtin().unwrap();
    let mut p = program(&config);
    p.init();

    p.dispatch(Msg::PointerDown { x: 0.0, y: 0.0 });
    p.dispatch(Msg::PointerMove { x: 50.0, y: -20.0 });
    p.dispatch(Msg::PointerUp);
    p.surface_mut().take_ops();
    let result = p.dispatch(Msg::Wheel {
        x: 0.0,
        y: 0.0,
        delta_y: -100.0,
    });

    assert!(result.rendered);
    let transform = p.surface().ops().iter().find_map(|op| match op {
        DrawOp::Transform(v) => Some(*v),
        _ => None,
    });
    let v = transform.unwrap();
    assert!((v.scale - 0.27).abs() < 1e-9);
    // (0,0) on canvas stays fixed: local = (150, -80) / 0.17
    let (lx, ly) = v.to_local(0.0, 0.0);
    assert!((lx - 150.0 / 0.17).abs() < 1e-6);
    assert!((ly + 80.0 / 0.17).abs() < 1e-6);
}

#[test]
fn simulator_records_command_flow() {
    let config = CompositorConfig::builtin().unwrap();
    let mut sim =
        ProgramSimulator::new(Compositor::from_config(&config)).with_assets(loaded(&config, vec![]));
    sim.init();
    sim.send_all([
        Msg::toggle("Drach", true),
        Msg::toggle("Nobody", true),
        Msg::toggle("Gandzuk", true),
    ]);

    assert_eq!(
        sim.command_log(),
        &[
            CmdRecord::Redraw,
            CmdRecord::Batch(2),
            CmdRecord::Log("Changed base to: Base_2".into()),
            CmdRecord::Redraw,
            CmdRecord::None,
            CmdRecord::Redraw,
        ]
    );
    assert_eq!(sim.redraw_count(), 3);
    assert_eq!(
        sim.capture_frame().last(),
        Some(&DrawOp::Reset),
    );
    assert_eq!(
        sim.last_report().map(|r| r.drawn.clone()).unwrap_or_default(),
        vec![
            "./img/Base_2.svg".to_string(),
            "./img/Tarasenko.svg".to_string(),
            "./img/Drach.svg".to_string(),
            "./img/Gandzuk.svg".to_string(),
        ]
    );
}
