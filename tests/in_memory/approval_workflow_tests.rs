//! In-memory integration tests for the approval and completion workflow.

use super::helpers::{Workboard, context_for, workboard};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use serde_json::json;
use ::workboard::action::{ErrorKind, respond};
use ::workboard::directory::domain::{Actor, Department, Role};
use ::workboard::workflow::{
    domain::{WorkItemKind, WorkflowState},
    services::CreateWorkItemRequest,
};

struct Team {
    admin: Actor,
    head: Actor,
    member: Actor,
    department: Department,
}

async fn team(board: &Workboard) -> eyre::Result<Team> {
    let admin = board.bootstrap_admin().await?;
    let admin_context = context_for(&admin);
    let head = board
        .hire(&admin, "Hana Head", Role::DepartmentHead, None)
        .await?;
    let created = board
        .people
        .create_department(&admin_context, "Platform")
        .await?;
    let department = board
        .people
        .appoint_head(&admin_context, created.id(), head.id())
        .await?;
    let member = board
        .hire(&admin, "Milo Member", Role::Member, Some(department.id()))
        .await?;
    Ok(Team {
        admin,
        head,
        member,
        department,
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn head_scoped_task_completion_follows_headship(workboard: Workboard) -> eyre::Result<()> {
    let team = team(&workboard).await?;
    let task = workboard
        .work
        .create(
            &context_for(&team.head),
            CreateWorkItemRequest::new(WorkItemKind::Task, "Rotate credentials"),
        )
        .await?;
    ensure!(task.department_id() == Some(team.department.id()));

    let by_member = respond(
        "complete",
        workboard
            .work
            .complete(&context_for(&team.member), task.id())
            .await,
    );
    ensure!(serde_json::to_value(&by_member)? == json!({"error": "forbidden", "status": 403}));

    let by_head = respond(
        "complete",
        workboard
            .work
            .complete(&context_for(&team.head), task.id())
            .await,
    );
    ensure!(by_head.status() == 200);
    let completed = by_head.data().ok_or_eyre("missing payload")?;
    ensure!(completed.state() == WorkflowState::Completed);

    let body = serde_json::to_value(&by_head)?;
    ensure!(body.get("success") == Some(&json!(true)));
    let reported_id = body.pointer("/data/id").ok_or_eyre("missing item id")?;
    ensure!(*reported_id == json!(task.id().to_string()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_rejection_note_is_reported_as_bad_request(workboard: Workboard) -> eyre::Result<()> {
    let team = team(&workboard).await?;
    let task = workboard
        .work
        .create(
            &context_for(&team.head),
            CreateWorkItemRequest::new(WorkItemKind::Task, "Write runbook"),
        )
        .await?;

    let response = respond(
        "reject",
        workboard
            .work
            .reject(&context_for(&team.admin), task.id(), "")
            .await,
    );
    ensure!(
        serde_json::to_value(&response)? == json!({"error": "invalid_argument", "status": 400})
    );

    let unchanged = workboard
        .work
        .find(&context_for(&team.admin), task.id())
        .await?;
    ensure!(unchanged == task);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn milestone_rejection_keeps_completion(workboard: Workboard) -> eyre::Result<()> {
    let team = team(&workboard).await?;
    let head_context = context_for(&team.head);
    let milestone = workboard
        .work
        .create(
            &head_context,
            CreateWorkItemRequest::new(WorkItemKind::Milestone, "Beta launch")
                .with_assignee(team.member.id()),
        )
        .await?;
    let completed = workboard
        .work
        .complete(&context_for(&team.member), milestone.id())
        .await?;

    let rejected = workboard
        .work
        .reject(&head_context, milestone.id(), "Launch notes missing")
        .await?;

    ensure!(rejected.state() == WorkflowState::Rejected);
    ensure!(rejected.is_completed());
    ensure!(rejected.completed_at() == completed.completed_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creator_approval_locks_out_other_members(workboard: Workboard) -> eyre::Result<()> {
    let team = team(&workboard).await?;
    let task = workboard
        .work
        .create(
            &context_for(&team.head),
            CreateWorkItemRequest::new(WorkItemKind::Task, "Patch servers"),
        )
        .await?;

    let approved = workboard
        .work
        .approve(&context_for(&team.head), task.id())
        .await?;
    ensure!(approved.approved_by() == Some(team.head.id()));

    let stranger = workboard
        .hire(&team.admin, "Sam Stranger", Role::GroupLeader, None)
        .await?;
    let response = respond(
        "approve",
        workboard
            .work
            .approve(&context_for(&stranger), task.id())
            .await,
    );
    ensure!(response.error_kind() == Some(ErrorKind::Forbidden));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_assignee_loses_access(workboard: Workboard) -> eyre::Result<()> {
    let team = team(&workboard).await?;
    let task = workboard
        .work
        .create(
            &context_for(&team.head),
            CreateWorkItemRequest::new(WorkItemKind::Task, "Archive logs")
                .with_assignee(team.member.id()),
        )
        .await?;
    workboard
        .people
        .deactivate_employee(&context_for(&team.admin), team.member.id())
        .await?;

    let response = respond(
        "complete",
        workboard
            .work
            .complete(&context_for(&team.member), task.id())
            .await,
    );
    ensure!(response.error_kind() == Some(ErrorKind::Unauthorized));
    ensure!(response.status() == 401);
    Ok(())
}
