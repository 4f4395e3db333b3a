mod helpers;

use helpers::{axis, test_db, test_simulation};
use monolith::engine::{vectorize, NeuralState, Status};
use monolith::ledger::simulations::{
    delete_simulation, get_simulation, list_simulations, save_simulation, touch_simulation,
};
use monolith::ledger::types::Role;
use monolith::ledger::{messages, scars};

#[test]
fn delete_cascades_to_scars_and_messages() {
    let mut conn = test_db();
    let doomed = test_simulation(&conn, "doomed");
    let survivor = test_simulation(&conn, "survivor");

    for i in 0..3 {
        scars::record_scar(&conn, &doomed.id, &axis(i), 1.0, "hurt").unwrap();
    }
    scars::record_scar(&conn, &survivor.id, &axis(9), 1.0, "other").unwrap();
    messages::save_message(&conn, &doomed.id, Role::User, "hi", None).unwrap();
    messages::save_message(&conn, &doomed.id, Role::Model, "go away", None).unwrap();

    let result = delete_simulation(&mut conn, &doomed.id).unwrap();
    assert_eq!(result.scars_removed, 3);
    assert_eq!(result.messages_removed, 2);

    assert!(get_simulation(&conn, &doomed.id).is_err());
    assert!(scars::scars_for_simulation(&conn, &doomed.id, None).unwrap().is_empty());
    assert!(messages::messages_for_simulation(&conn, &doomed.id).unwrap().is_empty());
    assert_eq!(scars::scars_for_simulation(&conn, &survivor.id, None).unwrap().len(), 1);
}

#[test]
fn delete_unknown_simulation_fails() {
    let mut conn = test_db();
    let err = delete_simulation(&mut conn, "nope").unwrap_err();
    assert!(err.to_string().contains("simulation not found"));
}

#[test]
fn scar_window_keeps_most_recent_in_creation_order() {
    let conn = test_db();
    let sim = test_simulation(&conn, "seed");
    for i in 0..5 {
        scars::record_scar(&conn, &sim.id, &axis(i), 1.0, &format!("scar {i}")).unwrap();
    }

    let all = scars::scars_for_simulation(&conn, &sim.id, None).unwrap();
    let names: Vec<_> = all.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(names, ["scar 0", "scar 1", "scar 2", "scar 3", "scar 4"]);

    let recent = scars::scars_for_simulation(&conn, &sim.id, Some(2)).unwrap();
    let names: Vec<_> = recent.iter().map(|s| s.description.as_str()).collect();
    assert_eq!(names, ["scar 3", "scar 4"]);
    assert_eq!(recent[1].vector, axis(4));
}

#[test]
fn scar_description_is_cut_at_fifty_chars() {
    let conn = test_db();
    let sim = test_simulation(&conn, "seed");
    let long = "é".repeat(80);

    scars::record_scar(&conn, &sim.id, &vectorize(&long), 1.0, &long).unwrap();
    let stored = scars::scars_for_simulation(&conn, &sim.id, None).unwrap();
    assert_eq!(stored[0].description.chars().count(), 50);
}

#[test]
fn scar_depth_must_be_positive() {
    let conn = test_db();
    let sim = test_simulation(&conn, "seed");
    assert!(scars::record_scar(&conn, &sim.id, &axis(0), 0.0, "flat").is_err());
    assert!(scars::record_scar(&conn, &sim.id, &axis(0), -1.0, "neg").is_err());
}

#[test]
fn scar_for_unknown_simulation_is_rejected() {
    let conn = test_db();
    assert!(scars::record_scar(&conn, "ghost", &axis(0), 1.0, "x").is_err());
}

#[test]
fn transcript_keeps_order_and_state() {
    let conn = test_db();
    let sim = test_simulation(&conn, "seed");
    let state = NeuralState {
        tension: 0.123456789,
        pain: 42.5,
        status: Status::Pain,
    };

    messages::save_message(&conn, &sim.id, Role::User, "first", None).unwrap();
    messages::save_message(&conn, &sim.id, Role::Model, "second", Some(state)).unwrap();
    messages::save_message(&conn, &sim.id, Role::User, "third", None).unwrap();

    let transcript = messages::messages_for_simulation(&conn, &sim.id).unwrap();
    let contents: Vec<_> = transcript.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["first", "second", "third"]);
    assert_eq!(transcript[1].role, Role::Model);
    assert_eq!(transcript[1].state, Some(state));
    assert!(transcript[2].state.is_none());
}

#[test]
fn upsert_keeps_identity_and_creation_time() {
    let conn = test_db();
    let original = test_simulation(&conn, "anchor");

    let mut edited = original.clone();
    edited.name = "Renamed".into();
    edited.identity_vector = axis(0);
    edited.created_at = "1999-01-01T00:00:00.000000Z".into();
    edited.custom_instructions = Some("Be terse.".into());
    save_simulation(&conn, &edited).unwrap();

    let loaded = get_simulation(&conn, &original.id).unwrap();
    assert_eq!(loaded.name, "Renamed");
    assert_eq!(loaded.custom_instructions.as_deref(), Some("Be terse."));
    assert_eq!(loaded.identity_vector, vectorize("anchor"));
    assert_eq!(loaded.created_at, original.created_at);
}

#[test]
fn list_puts_recently_active_first() {
    let conn = test_db();
    let older = test_simulation(&conn, "one");
    let newer = test_simulation(&conn, "two");

    let listed = list_simulations(&conn).unwrap();
    assert_eq!(listed[0].id, newer.id);

    std::thread::sleep(std::time::Duration::from_millis(2));
    touch_simulation(&conn, &older.id).unwrap();
    let listed = list_simulations(&conn).unwrap();
    assert_eq!(listed[0].id, older.id);
    assert!(listed[0].last_active > listed[0].created_at);
}
