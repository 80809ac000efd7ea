//! Tests for the release detail view
//!
//! The view is driven against an in-memory backend. Commands are executed
//! in order and their results polled back, the same way the run loop does.

mod common;

use common::{FakeBackend, argo_cd, execute_all, latest, names};
use helmdeck::api::ClientError;
use helmdeck::constants::GENERIC_RETRY_PROMPT;
use helmdeck::models::{ReleaseInfoKind, ReleaseTab, ResourceRef};
use helmdeck::services::{
    Command, Dialog, Loadable, ReleaseView, Route, UninstallState, UpgradeAction, ViewOptions,
};

fn options() -> ViewOptions {
    ViewOptions {
        context: Some("kind-dev".to_string()),
        ..Default::default()
    }
}

/// Open the view and let its initial reads settle
async fn open_settled(backend: &FakeBackend, options: ViewOptions) -> ReleaseView {
    let (mut view, commands) = ReleaseView::open(argo_cd(), options);
    execute_all(backend, commands).await;
    let follow_up = view.poll();
    assert!(follow_up.is_empty());
    view
}

/// Run commands and poll until the view stops asking for more
async fn settle(backend: &FakeBackend, view: &mut ReleaseView, mut commands: Vec<Command>) {
    while !commands.is_empty() {
        execute_all(backend, commands).await;
        commands = view.poll();
    }
}

#[tokio::test]
async fn test_open_requests_latest_history_and_tab() {
    let (view, commands) = ReleaseView::open(argo_cd(), options());
    assert_eq!(
        names(&commands),
        vec!["Fetch latest version", "Fetch history", "Fetch resources"]
    );
    assert_eq!(view.upgrade_action(), UpgradeAction::Checking);
    assert!(view.history().is_loading());
}

#[tokio::test]
async fn test_info_tab_reads_current_revision() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(&backend, options()).await;

    let command = view.select_tab(ReleaseTab::Values);
    match &command {
        Command::FetchReleaseInfo {
            kind,
            revision,
            user_defined_only,
            ..
        } => {
            assert_eq!(*kind, ReleaseInfoKind::Values);
            assert_eq!(*revision, 3);
            assert!(*user_defined_only);
        }
        other => panic!("unexpected command: {:?}", other),
    }
    settle(&backend, &mut view, vec![command]).await;
    assert_eq!(
        view.tab_content().ready().map(String::as_str),
        Some("values of argo-cd at revision 3 (user defined)")
    );
}

#[tokio::test]
async fn test_rollback_sends_current_revision() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(&backend, options()).await;

    assert_eq!(view.rollback_target(), Some(2));
    assert!(view.request_rollback());
    assert_eq!(view.dialog(), Dialog::Rollback);

    let command = view.confirm_rollback().expect("rollback command");
    match &command {
        Command::Rollback { revision, .. } => assert_eq!(*revision, 3),
        other => panic!("unexpected command: {:?}", other),
    }
    assert_eq!(view.dialog(), Dialog::None);
    assert!(view.is_rolling_back());

    execute_all(&backend, vec![command]).await;
    assert_eq!(*backend.rollbacks.lock().unwrap(), vec![3]);
}

#[tokio::test]
async fn test_rollback_refetches_history_once_on_success() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(&backend, options()).await;
    assert_eq!(backend.count("get_history"), 1);

    view.request_rollback();
    let command = view.confirm_rollback().unwrap();
    execute_all(&backend, vec![command]).await;

    let follow_up = view.poll();
    assert_eq!(
        names(&follow_up),
        vec!["Fetch history", "Fetch latest version"]
    );
    settle(&backend, &mut view, follow_up).await;

    assert_eq!(backend.count("get_history"), 2);
    assert_eq!(view.release().revision, 4);
    assert_eq!(view.rollback_error(), None);
    assert!(!view.is_rolling_back());
    assert!(view.poll().is_empty());
}

#[tokio::test]
async fn test_rollback_refetches_history_once_on_failure() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(&backend, options()).await;
    backend.fail("rollback", ClientError::Unknown("timeout".into()));

    view.request_rollback();
    let command = view.confirm_rollback().unwrap();
    execute_all(&backend, vec![command]).await;

    let follow_up = view.poll();
    assert_eq!(
        names(&follow_up),
        vec!["Fetch history", "Fetch latest version"]
    );
    settle(&backend, &mut view, follow_up).await;

    assert_eq!(backend.count("get_history"), 2);
    assert_eq!(view.rollback_error(), Some(GENERIC_RETRY_PROMPT));
    assert_eq!(view.release().revision, 3);
    // The control is usable again
    assert!(view.can_rollback());
}

#[tokio::test]
async fn test_rollback_rereads_open_tab_at_new_revision() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(
        &backend,
        ViewOptions {
            tab: ReleaseTab::Manifests,
            ..options()
        },
    )
    .await;
    assert_eq!(
        view.tab_content().ready().map(String::as_str),
        Some("manifests of argo-cd at revision 3")
    );

    view.request_rollback();
    let command = view.confirm_rollback().unwrap();
    execute_all(&backend, vec![command]).await;
    let resync = view.poll();
    execute_all(&backend, resync).await;

    let refresh = view.poll();
    assert_eq!(names(&refresh), vec!["Fetch release info"]);
    assert!(view.tab_content().is_loading());
    settle(&backend, &mut view, refresh).await;

    assert_eq!(view.release().revision, 4);
    assert_eq!(
        view.tab_content().ready().map(String::as_str),
        Some("manifests of argo-cd at revision 4")
    );
    assert_eq!(backend.count("get_release_info"), 2);
}

#[tokio::test]
async fn test_rollback_cannot_be_submitted_twice() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(&backend, options()).await;

    view.request_rollback();
    let first = view.confirm_rollback();
    assert!(first.is_some());

    // Pending: neither the dialog nor a second confirm goes through
    assert!(!view.can_rollback());
    assert!(!view.request_rollback());
    assert!(view.confirm_rollback().is_none());

    execute_all(&backend, first.into_iter().collect()).await;
    assert_eq!(backend.count("rollback"), 1);
}

#[tokio::test]
async fn test_rollback_unavailable_on_first_revision() {
    let mut first = argo_cd();
    first.revision = 1;
    let (mut view, _) = ReleaseView::open(first, options());

    assert_eq!(view.rollback_target(), None);
    assert!(!view.can_rollback());
    assert!(!view.request_rollback());
    assert!(view.confirm_rollback().is_none());
}

#[tokio::test]
async fn test_uninstall_needs_loaded_resources() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(&backend, options()).await;

    let fetch = view.request_uninstall().expect("resources are re-read");
    assert_eq!(fetch.name(), "Fetch resources");
    assert_eq!(view.dialog(), Dialog::Uninstall);

    // Still loading
    assert_eq!(view.uninstall_state(), UninstallState::Loading);
    assert!(view.confirm_uninstall().is_none());

    // Loaded but empty
    settle(&backend, &mut view, vec![fetch]).await;
    assert_eq!(view.uninstall_state(), UninstallState::Empty);
    assert!(!view.can_confirm_uninstall());
    assert!(view.confirm_uninstall().is_none());
    assert_eq!(backend.count("uninstall"), 0);
}

#[tokio::test]
async fn test_uninstall_failed_resource_list_blocks_confirm() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(&backend, options()).await;
    backend.fail("get_resources", ClientError::BackendUnavailable("down".into()));

    let fetch = view.request_uninstall().unwrap();
    settle(&backend, &mut view, vec![fetch]).await;
    assert_eq!(
        view.uninstall_state(),
        UninstallState::Failed(GENERIC_RETRY_PROMPT)
    );
    assert!(view.confirm_uninstall().is_none());
}

#[tokio::test]
async fn test_uninstall_navigates_home() {
    let backend = FakeBackend::with_release(&argo_cd());
    backend.resources.lock().unwrap().extend([
        ResourceRef::new("Deployment", "argo-cd-server"),
        ResourceRef::new("Service", "argo-cd-server"),
    ]);
    let mut view = open_settled(&backend, options()).await;

    let fetch = view.request_uninstall().unwrap();
    settle(&backend, &mut view, vec![fetch]).await;
    match view.uninstall_state() {
        UninstallState::Ready(resources) => assert_eq!(resources.len(), 2),
        other => panic!("unexpected state: {:?}", other),
    }

    let command = view.confirm_uninstall().expect("uninstall command");
    assert!(view.is_uninstalling());
    assert!(view.confirm_uninstall().is_none());

    settle(&backend, &mut view, vec![command]).await;
    assert_eq!(backend.count("uninstall"), 1);
    assert!(view.is_deleted());
    assert_eq!(view.dialog(), Dialog::None);
    assert_eq!(view.take_navigation(), Some(Route::Home));
    assert_eq!(view.take_navigation(), None);

    // Nothing else can be done to a deleted release
    assert_eq!(view.upgrade_action(), UpgradeAction::ReadOnly);
    assert!(!view.request_rollback());
}

#[tokio::test]
async fn test_uninstall_failure_keeps_release() {
    let backend = FakeBackend::with_release(&argo_cd());
    backend
        .resources
        .lock()
        .unwrap()
        .push(ResourceRef::new("ConfigMap", "argo-cd-cm"));
    backend.fail("uninstall", ClientError::Unknown("boom".into()));
    let mut view = open_settled(&backend, options()).await;

    let fetch = view.request_uninstall().unwrap();
    settle(&backend, &mut view, vec![fetch]).await;
    let command = view.confirm_uninstall().unwrap();
    settle(&backend, &mut view, vec![command]).await;

    assert!(!view.is_deleted());
    assert_eq!(view.uninstall_error(), Some(GENERIC_RETRY_PROMPT));
    assert_eq!(view.take_navigation(), None);
    assert!(view.can_confirm_uninstall());
}

#[tokio::test]
async fn test_suggested_repository_offers_add_repository() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut suggestion = latest("5.1.0", "argo", true);
    suggestion.urls = vec!["https://argoproj.github.io/argo-helm".to_string()];
    backend
        .latest
        .lock()
        .unwrap()
        .insert("argo-cd".to_string(), suggestion);

    let mut view = open_settled(&backend, options()).await;
    assert_eq!(
        view.upgrade_action(),
        UpgradeAction::AddRepository {
            repository: "argo".to_string(),
            url: Some("https://argoproj.github.io/argo-helm".to_string()),
        }
    );
    assert!(view.open_reconfigure().is_none());
    assert_eq!(view.dialog(), Dialog::None);
}

#[tokio::test]
async fn test_failed_latest_lookup_still_offers_reconfigure() {
    let backend = FakeBackend::with_release(&argo_cd());
    backend.fail("get_latest_version", ClientError::NotFound("argo-cd".into()));

    let mut view = open_settled(&backend, options()).await;
    assert_eq!(view.upgrade_action(), UpgradeAction::Offered { latest: None });

    let command = view.open_reconfigure().expect("reconfigure opens");
    assert_eq!(command.name(), "Fetch versions");
    assert_eq!(view.dialog(), Dialog::Reconfigure);
}

#[tokio::test]
async fn test_check_for_new_version_refetches_latest() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(&backend, options()).await;
    assert_eq!(view.upgrade_action(), UpgradeAction::Offered { latest: None });

    backend
        .latest
        .lock()
        .unwrap()
        .insert("argo-cd".to_string(), latest("5.1.0", "argo", false));
    let command = view.check_for_new_version().expect("latest is re-read");
    assert!(view.check_for_new_version().is_none());
    settle(&backend, &mut view, vec![command]).await;

    assert_eq!(
        view.upgrade_action(),
        UpgradeAction::Offered {
            latest: Some(latest("5.1.0", "argo", false))
        }
    );
    assert_eq!(backend.count("get_latest_version"), 2);
}

#[tokio::test]
async fn test_read_only_disables_mutations() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(
        &backend,
        ViewOptions {
            read_only: true,
            ..options()
        },
    )
    .await;

    assert!(view.is_read_only());
    assert!(!view.can_rollback());
    assert!(!view.request_rollback());
    assert!(view.request_uninstall().is_none());
    assert!(!view.open_tests());
    assert!(view.run_tests().is_none());
    assert_eq!(view.upgrade_action(), UpgradeAction::ReadOnly);
    assert!(view.open_reconfigure().is_none());

    // Reads still work
    let command = view.select_tab(ReleaseTab::Notes);
    settle(&backend, &mut view, vec![command]).await;
    assert!(view.tab_content().ready().is_some());
}

#[tokio::test]
async fn test_tests_run_once_while_pending() {
    let backend = FakeBackend::with_release(&argo_cd());
    *backend.test_output.lock().unwrap() = "Phase: Succeeded".to_string();
    let mut view = open_settled(&backend, options()).await;

    // Not before the dialog is open
    assert!(view.run_tests().is_none());
    assert!(view.open_tests());

    let command = view.run_tests().expect("tests start");
    assert!(view.is_running_tests());
    assert!(view.run_tests().is_none());
    assert_eq!(*view.test_result(), Loadable::Loading);

    settle(&backend, &mut view, vec![command]).await;
    assert_eq!(backend.count("run_tests"), 1);
    assert_eq!(
        view.test_result().ready().map(|r| r.as_str()),
        Some("Phase: Succeeded")
    );
}

#[tokio::test]
async fn test_tests_need_namespace_and_chart() {
    let mut release = argo_cd();
    release.chart_name = String::new();
    let (mut view, _) = ReleaseView::open(release, options());
    assert!(!view.can_run_tests());
    assert!(!view.open_tests());
}

#[tokio::test]
async fn test_closing_dialog_keeps_mutation_running() {
    let backend = FakeBackend::with_release(&argo_cd());
    let mut view = open_settled(&backend, options()).await;

    view.request_rollback();
    let command = view.confirm_rollback().unwrap();
    view.close_dialog();
    assert!(view.is_rolling_back());

    settle(&backend, &mut view, vec![command]).await;
    assert_eq!(view.release().revision, 4);
}

#[tokio::test]
async fn test_argo_cd_upgrade_check_then_rollback() {
    let backend = FakeBackend::with_release(&argo_cd());
    backend
        .latest
        .lock()
        .unwrap()
        .insert("argo-cd".to_string(), latest("5.1.0", "argo", false));

    let (mut view, commands) = ReleaseView::open(argo_cd(), options());
    settle(&backend, &mut view, commands).await;

    let history = view.history().ready().expect("history loaded");
    assert_eq!(history.len(), 3);
    match view.upgrade_action() {
        UpgradeAction::Offered { latest: Some(l) } => {
            assert_eq!(l.version, "5.1.0");
            assert!(l.is_newer_than(&view.release().chart_ver));
        }
        other => panic!("unexpected action: {:?}", other),
    }

    assert!(view.request_rollback());
    let command = view.confirm_rollback().unwrap();
    settle(&backend, &mut view, vec![command]).await;

    assert_eq!(view.release().revision, 4);
    assert_eq!(view.history().ready().map(Vec::len), Some(4));
    assert_eq!(view.rollback_target(), Some(3));
    assert_eq!(backend.count("rollback"), 1);
    assert_eq!(backend.count("get_history"), 2);
    assert_eq!(backend.count("get_latest_version"), 2);
}
