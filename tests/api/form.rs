use std::sync::Arc;

use aimaker_waitlist::client::WaitlistClient;
use aimaker_waitlist::domain::WaitlistEmail;
use aimaker_waitlist::form::{FormStatus, SignupForm};
use aimaker_waitlist::store::WaitlistStore;

use crate::helpers::{spawn_with_store, FailingStore, TestApp};

fn client(address: &str) -> WaitlistClient {
    WaitlistClient::new(address.parse().expect("Invalid test address"))
}

#[tokio::test]
async fn mount_picks_up_the_current_signup_count() {
    let app = TestApp::spawn().await;
    let client = client(&app.address);
    client
        .join("ada@example.com")
        .await
        .expect("Failed to join the waitlist");

    let mut form = SignupForm::new();
    form.mount(&client).await;

    assert_eq!(form.waitlist_count(), Some(1));
}

#[tokio::test]
async fn mount_stays_silent_when_the_count_is_unavailable() {
    let address = spawn_with_store(Arc::new(FailingStore)).await;
    let client = client(&address);

    let mut form = SignupForm::new();
    form.mount(&client).await;

    assert_eq!(form.waitlist_count(), None);
    assert_eq!(form.status(), FormStatus::Idle);
    assert_eq!(form.message(), "");
}

#[tokio::test]
async fn a_full_signup_round_trip_succeeds_and_bumps_the_count() {
    let app = TestApp::spawn().await;
    let client = client(&app.address);

    let mut form = SignupForm::new();
    form.mount(&client).await;
    assert_eq!(form.waitlist_count(), Some(0));

    form.input_changed("ursula@example.com");
    form.submit(&client).await;

    assert_eq!(form.status(), FormStatus::Success);
    assert_eq!(form.message(), "成功加入等待列表！");
    assert_eq!(form.email(), "");
    assert_eq!(form.waitlist_count(), Some(1));
    assert!(form.is_input_disabled());
}

#[tokio::test]
async fn the_input_is_trimmed_before_it_is_sent() {
    let app = TestApp::spawn().await;
    let client = client(&app.address);

    let mut form = SignupForm::new();
    form.input_changed("  ursula@example.com  ");
    form.submit(&client).await;
    assert_eq!(form.status(), FormStatus::Success);

    let email = WaitlistEmail::parse("ursula@example.com".into()).unwrap();
    let saved = app
        .store
        .find_by_email(&email)
        .await
        .expect("Failed to query the store")
        .expect("Failed to find saved signup");
    assert_eq!(saved.email.as_ref(), "ursula@example.com");
}

#[tokio::test]
async fn an_invalid_email_surfaces_the_server_message() {
    let app = TestApp::spawn().await;
    let client = client(&app.address);

    let mut form = SignupForm::new();
    form.input_changed("definitely-not-an-email");
    form.submit(&client).await;

    assert_eq!(form.status(), FormStatus::Error);
    assert_eq!(form.message(), "邮箱格式不正确");
    assert_eq!(form.email(), "definitely-not-an-email");
    assert!(!form.is_input_disabled());
}

#[tokio::test]
async fn a_duplicate_email_surfaces_the_server_message() {
    let app = TestApp::spawn().await;
    let client = client(&app.address);

    let mut first = SignupForm::new();
    first.input_changed("ursula@example.com");
    first.submit(&client).await;
    assert_eq!(first.status(), FormStatus::Success);

    let mut second = SignupForm::new();
    second.mount(&client).await;
    assert_eq!(second.waitlist_count(), Some(1));
    second.input_changed("URSULA@EXAMPLE.COM");
    second.submit(&client).await;

    assert_eq!(second.status(), FormStatus::Error);
    assert_eq!(second.message(), "该邮箱已经在等待列表中了");
    // A failed submission must not move the optimistic count
    assert_eq!(second.waitlist_count(), Some(1));
}

#[tokio::test]
async fn a_storage_outage_surfaces_the_server_message() {
    let address = spawn_with_store(Arc::new(FailingStore)).await;
    let client = client(&address);

    let mut form = SignupForm::new();
    form.input_changed("ursula@example.com");
    form.submit(&client).await;

    assert_eq!(form.status(), FormStatus::Error);
    assert_eq!(form.message(), "服务器错误，请稍后再试");
}
