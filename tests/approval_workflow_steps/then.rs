//! Then steps for approval workflow BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;
use workboard::workflow::domain::WorkItem;

fn stored_item(world: &ApprovalWorld) -> Result<WorkItem, eyre::Report> {
    let context = world.context("admin")?;
    let id = world.item()?.id();
    run_async(world.work.find(&context, id)).wrap_err("reload work item")
}

#[then("the action succeeds")]
fn action_succeeds(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let response = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre!("missing action response"))?;
    if !response.is_success() {
        return Err(eyre!("expected success, got {response:?}"));
    }
    Ok(())
}

#[then(r#"the action fails with "{error}" and status {status:u16}"#)]
fn action_fails(world: &ApprovalWorld, error: String, status: u16) -> Result<(), eyre::Report> {
    let response = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre!("missing action response"))?;
    let kind = response
        .error_kind()
        .ok_or_else(|| eyre!("expected failure, got {response:?}"))?;
    if kind.as_str() != error || response.status() != status {
        return Err(eyre!(
            "expected {error}/{status}, got {}/{}",
            kind.as_str(),
            response.status()
        ));
    }
    Ok(())
}

#[then(r#"the item state is "{state}""#)]
fn item_state_is(world: &ApprovalWorld, state: String) -> Result<(), eyre::Report> {
    let item = stored_item(world)?;
    if item.state().as_str() != state {
        return Err(eyre!("expected state {state}, found {}", item.state()));
    }
    Ok(())
}

#[then("the item is unchanged")]
fn item_is_unchanged(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let item = stored_item(world)?;
    if &item != world.item()? {
        return Err(eyre!("item changed: {item:?}"));
    }
    Ok(())
}

#[then(r#"the item is approved by "{name}""#)]
fn item_approved_by(world: &ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.actor(&name)?.id();
    let item = stored_item(world)?;
    if item.approved_by() != Some(expected) || item.rejection_note().is_some() {
        return Err(eyre!("expected approval by {name}, found {:?}", item.review()));
    }
    Ok(())
}

#[then("the item is still completed")]
fn item_still_completed(world: &ApprovalWorld) -> Result<(), eyre::Report> {
    let item = stored_item(world)?;
    if !item.is_completed() {
        return Err(eyre!("expected completed item, found {:?}", item.completion()));
    }
    Ok(())
}
