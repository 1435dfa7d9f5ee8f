//! Given steps for approval workflow BDD scenarios.

use super::world::{ApprovalWorld, run_async};
use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use workboard::directory::{
    domain::{Actor, DepartmentId, EmailAddress, PersonName, Power, Profile, Role},
    ports::ActorRepository,
    services::RegisterEmployeeRequest,
};
use workboard::workflow::{domain::WorkItemKind, services::CreateWorkItemRequest};

fn hire(
    world: &mut ApprovalWorld,
    name: &str,
    role: Role,
    department_id: Option<DepartmentId>,
) -> Result<Actor, eyre::Report> {
    let context = world.context("admin")?;
    let mut request =
        RegisterEmployeeRequest::new(name, format!("{}@example.com", name.to_lowercase()), role);
    if let Some(id) = department_id {
        request = request.in_department(id);
    }
    let actor = run_async(world.people.register_employee(&context, request))
        .wrap_err_with(|| format!("register {name}"))?;
    world.actors.insert(name.to_owned(), actor.clone());
    Ok(actor)
}

#[given("an administrator")]
fn an_administrator(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    let profile = Profile::new(
        PersonName::new("Root Admin")?,
        EmailAddress::new("root@example.com")?,
        None,
    );
    let admin = Actor::new(profile, Role::Admin, Power::Full, None, &DefaultClock);
    run_async(world.directory.store_actor(&admin)).wrap_err("store administrator")?;
    world.actors.insert("admin".to_owned(), admin);
    Ok(())
}

#[given(r#"a department head "{name}" heading "{department}""#)]
fn a_department_head(
    world: &mut ApprovalWorld,
    name: String,
    department: String,
) -> Result<(), eyre::Report> {
    let head = hire(world, &name, Role::DepartmentHead, None)?;
    let context = world.context("admin")?;
    let created = run_async(world.people.create_department(&context, &department))
        .wrap_err("create department")?;
    run_async(
        world
            .people
            .appoint_head(&context, created.id(), head.id()),
    )
    .wrap_err("appoint department head")?;
    world.departments.insert(department, created.id());
    Ok(())
}

#[given(r#"a member "{name}" of "{department}""#)]
fn a_member(
    world: &mut ApprovalWorld,
    name: String,
    department: String,
) -> Result<(), eyre::Report> {
    let department_id = *world
        .departments
        .get(&department)
        .ok_or_else(|| eyre!("unknown department {department}"))?;
    hire(world, &name, Role::Member, Some(department_id))?;
    Ok(())
}

#[given(r#"an employee "{name}" with no department"#)]
fn an_unattached_employee(world: &mut ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    hire(world, &name, Role::Member, None)?;
    Ok(())
}

#[given(r#""{name}" has created a {kind_name} "{title}""#)]
fn has_created_item(
    world: &mut ApprovalWorld,
    name: String,
    kind_name: String,
    title: String,
) -> Result<(), eyre::Report> {
    let kind = WorkItemKind::try_from(kind_name.as_str())?;
    let context = world.context(&name)?;
    let created = run_async(
        world
            .work
            .create(&context, CreateWorkItemRequest::new(kind, title)),
    )
    .wrap_err("create work item")?;
    world.current_item = Some(created);
    Ok(())
}

#[given(r#""{name}" has completed the item"#)]
fn has_completed_item(world: &mut ApprovalWorld, name: String) -> Result<(), eyre::Report> {
    let context = world.context(&name)?;
    let id = world.item()?.id();
    let completed =
        run_async(world.work.complete(&context, id)).wrap_err("complete work item")?;
    world.current_item = Some(completed);
    Ok(())
}
