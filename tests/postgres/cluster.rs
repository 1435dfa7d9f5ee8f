//! Embedded `PostgreSQL` cluster lifecycle for integration tests.
//!
//! One cluster is started per test binary. Tests never share a database:
//! each copies a migrated template into a scratch database that is dropped
//! with its [`TemporaryDatabase`] handle.

use crate::test_helpers::EnvVarGuard;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::worker_process_test_api::{
    WorkerOperation, WorkerRequest, WorkerRequestArgs, run as run_worker,
};
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Settings, Status};
use rstest::fixture;
use std::ffi::{OsStr, OsString};
use std::net::TcpListener;
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Duration;
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared `PostgreSQL` cluster handle for integration tests.
pub type PostgresCluster = &'static ManagedCluster;

static SHARED_CLUSTER: OnceLock<Result<ManagedCluster, String>> = OnceLock::new();
static TEMPLATE_LOCK: Mutex<()> = Mutex::new(());

/// Embedded `PostgreSQL` cluster started in-process, or through the
/// privilege-dropping worker when tests run as root.
pub struct ManagedCluster {
    bootstrap: TestBootstrapSettings,
    _server: Option<PostgreSQL>,
}

impl ManagedCluster {
    fn start() -> Result<Self, BoxError> {
        let port_override = free_port_override()?;
        let port_guard = EnvVarGuard::set_many(&port_override);
        let mut bootstrap = bootstrap_for_tests().map_err(boxed)?;
        drop(port_guard);
        sync_password_from_file(&mut bootstrap.settings)?;

        let env_vars = bootstrap.environment.to_env();
        let server = match bootstrap.privileges {
            ExecutionPrivileges::Root => {
                let setup = (WorkerOperation::Setup, bootstrap.setup_timeout);
                run_worker_operation(&bootstrap, &env_vars, setup)?;
                let start = (WorkerOperation::Start, bootstrap.start_timeout);
                run_worker_operation(&bootstrap, &env_vars, start)?;
                None
            }
            ExecutionPrivileges::Unprivileged => {
                let server = start_in_process(&bootstrap.settings, &env_vars)?;
                bootstrap.settings = server.settings().clone();
                Some(server)
            }
        };
        sync_port_from_pid(&mut bootstrap.settings)?;
        Ok(Self {
            bootstrap,
            _server: server,
        })
    }

    /// Returns the connection URL for `database` on this cluster.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.bootstrap.settings.url(database)
    }

    /// Creates `template` and runs `migrate` against its URL unless it
    /// already exists. A failed migration drops the half-built template.
    pub fn ensure_template<F>(&self, template: &str, migrate: F) -> Result<(), BoxError>
    where
        F: FnOnce(&str) -> Result<(), BoxError>,
    {
        let _guard = TEMPLATE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        if self.database_exists(template)? {
            return Ok(());
        }

        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(template)))?;
        if let Err(err) = migrate(&self.database_url(template)) {
            self.drop_database(template)?;
            return Err(err);
        }
        Ok(())
    }

    /// Copies `template` into a uniquely named scratch database.
    pub fn temporary_database(
        &'static self,
        template: &str,
    ) -> Result<TemporaryDatabase, BoxError> {
        let name = format!("workboard_{}", Uuid::new_v4().simple());
        self.execute_admin_sql(&format!(
            "CREATE DATABASE {} TEMPLATE {}",
            quote_identifier(&name),
            quote_identifier(template),
        ))?;
        Ok(TemporaryDatabase {
            cluster: self,
            url: self.database_url(&name),
            name,
        })
    }

    fn drop_database(&self, name: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(name)
        ))
    }

    fn admin_connection(&self) -> Result<PgConnection, BoxError> {
        PgConnection::establish(&self.database_url("postgres")).map_err(boxed)
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut connection = self.admin_connection()?;
        diesel::sql_query(sql).execute(&mut connection).map_err(boxed)?;
        Ok(())
    }

    fn database_exists(&self, name: &str) -> Result<bool, BoxError> {
        #[derive(diesel::QueryableByName)]
        struct ExistsRow {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut connection = self.admin_connection()?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(name)
        .get_result::<ExistsRow>(&mut connection)
        .map_err(boxed)?;
        Ok(row.exists)
    }
}

/// Scratch database dropped, connections and all, when the handle drops.
pub struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
    url: String,
}

impl TemporaryDatabase {
    /// Connection URL of the scratch database.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

/// Provides the shared cluster, starting it on first use.
///
/// Start-up runs on its own thread because the in-process path drives a
/// private runtime, which cannot block inside a test's runtime.
#[fixture]
pub fn postgres_cluster() -> Result<PostgresCluster, BoxError> {
    SHARED_CLUSTER
        .get_or_init(|| {
            std::thread::spawn(|| ManagedCluster::start().map_err(|err| err.to_string()))
                .join()
                .unwrap_or_else(|_| Err("cluster start-up panicked".to_owned()))
        })
        .as_ref()
        .map_err(|message| {
            format!("SKIP-TEST-CLUSTER: failed to start PostgreSQL: {message}").into()
        })
}

fn start_in_process(
    settings: &Settings,
    env_vars: &[(String, Option<String>)],
) -> Result<PostgreSQL, BoxError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(boxed)?;
    let _env_guard = EnvVarGuard::set_many(&env_vars_to_os(env_vars));
    let mut server = PostgreSQL::new(settings.clone());
    runtime.block_on(async {
        server.setup().await.map_err(boxed)?;
        if !matches!(server.status(), Status::Started) {
            server.start().await.map_err(boxed)?;
        }
        Ok::<(), BoxError>(())
    })?;
    Ok(server)
}

#[expect(
    clippy::ptr_arg,
    reason = "worker request arguments borrow the bootstrap environment as a Vec"
)]
fn run_worker_operation(
    bootstrap: &TestBootstrapSettings,
    env_vars: &Vec<(String, Option<String>)>,
    (operation, timeout): (WorkerOperation, Duration),
) -> Result<(), BoxError> {
    let worker = bootstrap.worker_binary.as_ref().ok_or_else(|| {
        boxed(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "running as root requires PG_EMBEDDED_WORKER to name a pg_worker binary",
        ))
    })?;
    let args = WorkerRequestArgs {
        worker: worker.as_path(),
        settings: &bootstrap.settings,
        env_vars,
        operation,
        timeout,
    };
    run_worker(&WorkerRequest::new(args)).map_err(boxed)
}

fn boxed(err: impl std::error::Error + Send + Sync + 'static) -> BoxError {
    Box::new(err)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn env_vars_to_os(env_vars: &[(String, Option<String>)]) -> Vec<(OsString, Option<OsString>)> {
    env_vars
        .iter()
        .map(|(key, value)| (OsString::from(key), value.as_ref().map(OsString::from)))
        .collect()
}

/// Picks a free port for the cluster unless `PG_PORT` is already set.
fn free_port_override() -> Result<Vec<(OsString, Option<OsString>)>, BoxError> {
    if std::env::var_os("PG_PORT").is_some() {
        return Ok(Vec::new());
    }
    let listener = TcpListener::bind(("127.0.0.1", 0)).map_err(boxed)?;
    let port = listener.local_addr().map_err(boxed)?.port();
    Ok(vec![(
        OsString::from("PG_PORT"),
        Some(OsString::from(port.to_string())),
    )])
}

fn sync_password_from_file(settings: &mut Settings) -> Result<(), BoxError> {
    let (dir, file_name) = open_parent_dir(&settings.password_file)?;
    match dir.read_to_string(file_name) {
        Ok(contents) => {
            let password = contents.trim_end();
            if !password.is_empty() {
                password.clone_into(&mut settings.password);
            }
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(boxed(err)),
    }
}

/// The fourth line of `postmaster.pid` holds the port the server bound.
fn sync_port_from_pid(settings: &mut Settings) -> Result<(), BoxError> {
    let data_dir =
        Dir::open_ambient_dir(&settings.data_dir, ambient_authority()).map_err(boxed)?;
    let contents = match data_dir.read_to_string("postmaster.pid") {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(boxed(err)),
    };
    if let Some(port) = contents
        .lines()
        .nth(3)
        .and_then(|line| line.trim().parse::<u16>().ok())
    {
        settings.port = port;
    }
    Ok(())
}

fn open_parent_dir(path: &Path) -> Result<(Dir, &OsStr), BoxError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| boxed(std::io::Error::other("path must include a file name")))?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(boxed)?;
    Ok((dir, file_name))
}
