//! When steps for approval workflow BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use rstest_bdd_macros::when;
use workboard::action::respond;
use workboard::workflow::domain::WorkItemId;

#[when(r#""{name}" completes the item"#)]
fn completes_item(world: &mut ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    let context = world.context(&name)?;
    let id = world.item()?.id();
    let response = respond("complete", run_async(world.work.complete(&context, id)));
    world.record(response);
    Ok(())
}

#[when(r#""{name}" completes an unknown item"#)]
fn completes_unknown_item(world: &mut ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    let context = world.context(&name)?;
    let response = respond(
        "complete",
        run_async(world.work.complete(&context, WorkItemId::new())),
    );
    world.record(response);
    Ok(())
}

#[when(r#""{name}" approves the item"#)]
fn approves_item(world: &mut ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    let context = world.context(&name)?;
    let id = world.item()?.id();
    let response = respond("approve", run_async(world.work.approve(&context, id)));
    world.record(response);
    Ok(())
}

#[when(r#""{name}" rejects the item with note "{note}""#)]
fn rejects_item(world: &mut ApprovalWorld, name: String, note: String) -> Result<(), eyre::Report> {
    let context = world.context(&name)?;
    let id = world.item()?.id();
    let response = respond("reject", run_async(world.work.reject(&context, id, &note)));
    world.record(response);
    Ok(())
}

#[when(r#""{name}" rejects the item with a blank note"#)]
fn rejects_item_blank(world: &mut ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    let context = world.context(&name)?;
    let id = world.item()?.id();
    let response = respond("reject", run_async(world.work.reject(&context, id, "   ")));
    world.record(response);
    Ok(())
}
