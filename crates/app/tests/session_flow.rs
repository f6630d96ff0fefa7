//! End-to-end flows through the session layer: sign-in, aggregation,
//! composing, cross-session notification, and remote fallback.

use std::sync::Arc;
use std::time::Duration;

use curalink_app::{RemoteMirror, SendOutcome, Session};
use curalink_core::{
    Account, ChangeBus, Database, MessageDraft, Party, PartyKind, ProviderParty, RoleProfile,
};
use curalink_net::{DocumentApi, MemoryDocumentApi};
use tempfile::tempdir;

fn account(role: PartyKind, email: &str) -> Account {
    let mut account = Account::new(role);
    account.email = Some(email.to_string());
    account
}

fn seed_doctor_message(db: &Database, patient: &str, doctor: &str, body: &str) {
    db.messages()
        .append(MessageDraft {
            sender: Party::new(patient, "Pat", "a.png"),
            body: body.to_string(),
            sent_at: chrono::Utc::now(),
            patient: Party::new(patient, "Pat", "a.png"),
            provider: ProviderParty::Doctor(Party::new(doctor, "Doc", "d.png")),
        })
        .unwrap();
}

#[test]
fn patient_with_empty_log_sees_nothing() {
    let mut session = Session::new(Database::open_in_memory().unwrap());
    session
        .sign_in(account(PartyKind::Patient, "p1@mail.com"))
        .unwrap();

    assert!(session.conversations().is_empty());
    assert!(session.selected_conversation().is_none());
}

#[test]
fn patient_sees_seeded_doctor_thread_and_replies() {
    let db = Database::open_in_memory().unwrap();
    seed_doctor_message(&db, "p1@mail.com", "d1@mail.com", "hi");

    let mut session = Session::new(db);
    session
        .sign_in(account(PartyKind::Patient, "p1@mail.com"))
        .unwrap();

    // One thread with the doctor, auto-selected as most recent
    assert_eq!(session.conversations().len(), 1);
    let conv = session.selected_conversation().unwrap();
    assert_eq!(conv.id, "d1@mail.com");
    assert_eq!(conv.kind, PartyKind::Doctor);
    assert_eq!(conv.messages.len(), 1);

    // Reply goes through the same aggregation path
    let outcome = session.send_message("thanks").unwrap();
    assert!(matches!(outcome, SendOutcome::Sent(_)));

    let conv = session.selected_conversation().unwrap();
    assert_eq!(conv.messages.len(), 2);
    assert_eq!(conv.last_message, "thanks");
    assert!(conv.messages[0].sent_at <= conv.messages[1].sent_at);
    assert_eq!(session.db().lock().unwrap().messages().len().unwrap(), 2);
}

#[test]
fn whitespace_only_text_appends_nothing() {
    let db = Database::open_in_memory().unwrap();
    seed_doctor_message(&db, "p1@mail.com", "d1@mail.com", "hi");

    let mut session = Session::new(db);
    session
        .sign_in(account(PartyKind::Patient, "p1@mail.com"))
        .unwrap();

    assert_eq!(
        session.send_message("   ").unwrap(),
        SendOutcome::EmptyMessage
    );
    assert_eq!(session.db().lock().unwrap().messages().len().unwrap(), 1);
}

#[test]
fn doctor_and_pharmacy_are_separate_conversations() {
    let db = Database::open_in_memory().unwrap();
    seed_doctor_message(&db, "p1@mail.com", "d1@mail.com", "checkup");
    db.messages()
        .append(MessageDraft {
            sender: Party::new("p1@mail.com", "Pat", "a.png"),
            body: "refill please".to_string(),
            sent_at: chrono::Utc::now(),
            patient: Party::new("p1@mail.com", "Pat", "a.png"),
            provider: ProviderParty::Pharmacy(Party::new("ph1@mail.com", "Pharm", "ph.png")),
        })
        .unwrap();

    let mut session = Session::new(db);
    session
        .sign_in(account(PartyKind::Patient, "p1@mail.com"))
        .unwrap();

    assert_eq!(session.conversations().len(), 2);
    assert!(session.select("d1@mail.com"));
    assert!(session.select("ph1@mail.com"));
}

#[test]
fn doctor_views_the_same_log_from_the_other_side() {
    let db = Database::open_in_memory().unwrap();
    seed_doctor_message(&db, "p1@mail.com", "d1@mail.com", "hi");

    let mut session = Session::new(db);
    let mut doctor = Account::new(PartyKind::Doctor);
    doctor.doctor_profile = Some(RoleProfile {
        email: Some("D1@mail.com".to_string()), // canonicalized on resolve
        ..Default::default()
    });
    session.sign_in(doctor).unwrap();

    assert_eq!(session.conversations().len(), 1);
    let conv = &session.conversations()[0];
    assert_eq!(conv.id, "p1@mail.com");
    assert_eq!(conv.kind, PartyKind::Patient);
}

#[test]
fn sessions_sharing_a_bus_observe_each_others_sends() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("curalink.db");
    let bus = ChangeBus::default();

    let mut patient = Session::new(Database::open(&path).unwrap()).with_bus(bus.clone());
    let mut doctor = Session::new(Database::open(&path).unwrap()).with_bus(bus.clone());

    let db = patient.db();
    seed_doctor_message(
        &db.lock().unwrap(),
        "p1@mail.com",
        "d1@mail.com",
        "opening",
    );

    patient
        .sign_in(account(PartyKind::Patient, "p1@mail.com"))
        .unwrap();
    doctor
        .sign_in(account(PartyKind::Doctor, "d1@mail.com"))
        .unwrap();
    assert_eq!(doctor.selected_conversation().unwrap().messages.len(), 1);

    let mut rx = doctor.subscribe();
    patient.send_message("are you there?").unwrap();

    let handled = doctor.drain_events(&mut rx).unwrap();
    assert!(handled > 0);
    let conv = doctor.selected_conversation().unwrap();
    assert_eq!(conv.messages.len(), 2);
    assert_eq!(conv.last_message, "are you there?");
}

#[tokio::test(flavor = "multi_thread")]
async fn sends_mirror_to_remote_and_survive_remote_outage() {
    let api = Arc::new(MemoryDocumentApi::new());

    let db = Database::open_in_memory().unwrap();
    seed_doctor_message(&db, "p1@mail.com", "d1@mail.com", "hi");

    let mut session = Session::new(db).with_mirror(RemoteMirror::new(api.clone()));
    session
        .sign_in(account(PartyKind::Patient, "p1@mail.com"))
        .unwrap();

    session.send_message("mirrored").unwrap();
    let mut mirrored = Vec::new();
    for _ in 0..50 {
        mirrored = api.get("Messages").await.unwrap();
        if !mirrored.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(mirrored.len(), 1);

    // Remote outage: the send still succeeds and persists locally
    api.set_online(false);
    let outcome = session.send_message("local only").unwrap();
    assert!(matches!(outcome, SendOutcome::Sent(_)));
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(session.db().lock().unwrap().messages().len().unwrap(), 3);
    api.set_online(true);
    assert_eq!(api.get("Messages").await.unwrap().len(), 1);
}
