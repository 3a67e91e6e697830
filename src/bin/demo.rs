//! # Buildspace Demo
//!
//! Scripts a small bicycle build through the same entry points a UI would
//! use and logs the scene and score after every step.
//!
//! ```text
//! RUST_LOG=info cargo run --bin buildspace-demo -- [config.toml]
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{Context, Result};
use buildspace::prelude::*;
use buildspace::score;

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SandboxConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => SandboxConfig::default(),
    };
    let mut sandbox = Sandbox::new(config, CatalogAssets::new());

    // Keyboard wiring lives outside the core; actions are queued and drained
    let queue = Rc::new(RefCell::new(VecDeque::new()));
    let mut dispatcher = InputDispatcher::new();
    let sink = Rc::clone(&queue);
    dispatcher.subscribe(move |action| sink.borrow_mut().push_back(*action));

    let mut previous = None;
    let mut report = |sandbox: &Sandbox<CatalogAssets>, outcome: &CommandOutcome| {
        let result = sandbox.score();
        log::info!(
            "{} | {} items | score {:.1} (CO2 {:.2} kg)",
            outcome.message(),
            sandbox.store().len(),
            result.overall_score,
            result.total_co2
        );
        if let Some(hint) = score::hint(previous.as_ref(), &result) {
            log::info!("Hint: {}", hint);
        }
        previous = Some(result);
    };

    let outcome = sandbox.add_component_at(ComponentKind::Frame, MaterialKind::Wood, Seed::Default)?;
    report(&sandbox, &outcome);
    let frame = sandbox
        .store()
        .selected_id()
        .context("frame was not selected after adding it")?;

    let outcome = sandbox.add_component(ComponentKind::Seat, MaterialKind::Plastic)?;
    report(&sandbox, &outcome);

    // Drag the seat onto the top of the frame, then release
    let frame_top = sandbox
        .store()
        .get(frame)
        .and_then(|item| item.position())
        .context("frame has no position")?
        + Vec3::new(0.0, 0.6, 0.0);
    sandbox.drag_update(Transform::from_position(frame_top))?;
    let outcome = sandbox.drag_end()?;
    report(&sandbox, &outcome);

    dispatcher.emit(InputAction::Glue);
    dispatcher.emit(InputAction::SetTransformMode(TransformMode::Rotate));
    dispatcher.emit(InputAction::Duplicate);

    let pending: Vec<InputAction> = queue.borrow_mut().drain(..).collect();
    for action in pending {
        let outcome = sandbox.handle_action(action)?;
        report(&sandbox, &outcome);
    }

    let outcome = sandbox.set_material_for_selected(MaterialKind::RecycledPlastic)?;
    report(&sandbox, &outcome);

    let outcome = sandbox.deglue_selected()?;
    report(&sandbox, &outcome);

    sandbox.store().validate()?;
    for item in sandbox.snapshot().items() {
        let position = item.position().unwrap_or_else(|| Vec3::new(0.0, 0.0, 0.0));
        log::info!(
            "{} {:<8} at ({:.2}, {:.2}, {:.2})",
            item.id(),
            if item.is_group() { "group" } else { "object" },
            position.x,
            position.y,
            position.z
        );
    }

    Ok(())
}
