use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::*;
use starrupture_server::config::ServerConfig;
use starrupture_server::error::{Error, Result};
use starrupture_server::installer::{PackageInstaller, UpdateRequest};
use starrupture_server::plugin::APP_ID;
use starrupture_server::server::{ServerAdapter, ServerProcess};
use std::path::{Path, PathBuf};

// Define a mock for the PackageInstaller trait
mock! {
    pub Installer {}

    #[async_trait]
    impl PackageInstaller for Installer {
        async fn update(&self, request: UpdateRequest) -> Result<ServerProcess>;
        async fn local_build(&self, server_id: &str, install_dir: &Path, app_id: &str) -> Result<String>;
        async fn remote_build(&self, app_id: &str) -> Result<String>;
    }
}

const INSTALL_ROOT: &str = "/srv/starrupture/2";

fn create_test_adapter(installer: MockInstaller) -> ServerAdapter {
    ServerAdapter::new(ServerConfig::with_defaults("2", INSTALL_ROOT), installer)
}

#[cfg(unix)]
fn finished_installer_process() -> Result<ServerProcess> {
    let mut command = async_process::Command::new("true");
    command.stdout(async_process::Stdio::null());
    ServerProcess::spawn("steamcmd", &mut command, None)
}

#[cfg(unix)]
#[tokio::test]
async fn test_update_delegates_with_fixed_package() -> Result<()> {
    let mut installer = MockInstaller::new();
    installer
        .expect_update()
        .with(eq(UpdateRequest {
            server_id: "2".to_string(),
            install_dir: PathBuf::from(INSTALL_ROOT),
            app_id: "3809400".to_string(),
            validate: true,
            custom_args: Some("-beta public".to_string()),
            login_anonymous: true,
        }))
        .times(1)
        .returning(|_| finished_installer_process());

    let adapter = create_test_adapter(installer);
    let mut process = adapter.update(true, Some("-beta public")).await?;

    // The installer has already finished by the time update returns.
    assert!(!process.is_running());
    assert_eq!(adapter.last_error(), None);

    Ok(())
}

#[tokio::test]
async fn test_update_error_is_passed_through_verbatim() {
    let mut installer = MockInstaller::new();
    installer
        .expect_update()
        .withf(|request| !request.validate && request.custom_args.is_none())
        .times(1)
        .returning(|_| {
            Err(Error::Installer(
                "ERROR! Failed to install app '3809400' (No subscription)".to_string(),
            ))
        });

    let adapter = create_test_adapter(installer);
    let result = adapter.update(false, None).await;

    assert!(matches!(result, Err(Error::Installer(_))));
    assert_eq!(
        adapter.last_error().as_deref(),
        Some("ERROR! Failed to install app '3809400' (No subscription)")
    );
}

#[tokio::test]
async fn test_build_queries_delegate() -> Result<()> {
    let mut installer = MockInstaller::new();
    installer
        .expect_local_build()
        .with(eq("2"), eq(PathBuf::from(INSTALL_ROOT)), eq(APP_ID))
        .times(1)
        .returning(|_, _, _| Ok("20861441".to_string()));
    installer
        .expect_remote_build()
        .with(eq(APP_ID))
        .times(1)
        .returning(|_| Ok("20900012".to_string()));

    let adapter = create_test_adapter(installer);

    let local = adapter.local_build().await?;
    let remote = adapter.remote_build().await?;

    assert_eq!(local, "20861441");
    assert_eq!(remote, "20900012");
    assert_ne!(local, remote);

    Ok(())
}

#[tokio::test]
async fn test_build_query_failure_sets_last_error() {
    let mut installer = MockInstaller::new();
    installer
        .expect_remote_build()
        .times(1)
        .returning(|_| Err(Error::Installer("SteamCMD unreachable".to_string())));

    let adapter = create_test_adapter(installer);

    assert!(adapter.remote_build().await.is_err());
    assert_eq!(adapter.last_error().as_deref(), Some("SteamCMD unreachable"));
}
