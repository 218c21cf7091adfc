mod common;

use std::rc::Rc;

use common::{locations, login_ok, vehicle_ok, RecordingAgent, ScriptedTransport};
use serde_json::json;
use stock_adapters::payloads::VehicleRequest;
use stock_adapters::steps::{ApproveStep, CreateVehicleStep, LoginStep, RegisterStep, VerifyLocationCountStep};
use stock_client::{ApiResponse, Method, Transport};
use stock_core::{LocationCountExpectation, StepDefinition, StepRunResult, StepSeverity, TestContext};

fn logged_in_context() -> TestContext {
    let mut ctx = TestContext::from_stamp(1_700_000_000);
    ctx.record_login("tok".into(), "agency-1".into());
    ctx
}

#[test]
fn register_posts_unique_identifiers_and_passes_on_success() {
    let api = ScriptedTransport::new(vec![ApiResponse::new(json!({"success": true, "message": "Agency Added and admin created"}), 201)]);
    let step = RegisterStep::new(api.clone());
    let mut ctx = TestContext::from_stamp(1_700_000_000);

    assert_eq!(step.severity(), StepSeverity::Fatal);
    assert!(step.run(&mut ctx).is_pass());

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].path, "/auth/register");
    let body = calls[0].body.clone().unwrap();
    assert_eq!(body["sapcode"], "TEST_1700000000");
    assert_eq!(body["email"], "testlpg_1700000000@example.com");
    assert_eq!(body["gasAgencyName"], "TestLPG Agency");
    assert_eq!(body["company"], "IOCL");
}

#[test]
fn register_fails_on_duplicate_or_success_false() {
    let api = ScriptedTransport::new(vec![ApiResponse::new(json!({"success": false, "message": "Agency with same email or sapcode already exists"}), 409),
                                          ApiResponse::new(json!({"success": false}), 200)]);
    let step = RegisterStep::new(api);
    let mut ctx = TestContext::from_stamp(1);

    match step.run(&mut ctx) {
        StepRunResult::Failed { reason, .. } => assert!(reason.contains("409") && reason.contains("already exists")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(!step.run(&mut ctx).is_pass(), "a 2xx without success=true is not a registration");
}

#[test]
fn approve_is_advisory_and_targets_context_email() {
    let (agent, seen) = RecordingAgent::new(false);
    let step = ApproveStep::new(Box::new(agent));
    let mut ctx = TestContext::from_stamp(5);
    assert_eq!(step.severity(), StepSeverity::Advisory);
    assert!(matches!(step.run(&mut ctx), StepRunResult::PassedWithSignals { .. }));
    assert_eq!(seen.borrow().as_slice(), ["testlpg_5@example.com"]);

    let (failing, _) = RecordingAgent::new(true);
    let step = ApproveStep::new(Box::new(failing));
    assert!(matches!(step.run(&mut ctx), StepRunResult::Failed { .. }));
}

#[test]
fn login_records_token_and_agency() {
    let api = ScriptedTransport::new(vec![login_ok("jwt", "agency-9")]);
    let step = LoginStep::new(api.clone());
    let mut ctx = TestContext::from_stamp(1_700_000_000);

    assert!(step.run(&mut ctx).is_pass());
    assert_eq!(ctx.auth_token(), Some("jwt"));
    assert_eq!(ctx.agency_id(), Some("agency-9"));
    let body = api.calls()[0].body.clone().unwrap();
    assert_eq!(body, json!({"identifier": "admin_TEST_1700000000", "password": "Test@123456"}));
}

#[test]
fn login_falls_back_to_session_cookie() {
    let response = ApiResponse::new(json!({"success": true, "agency": {"_id": "a1"}}), 200).with_cookie("token", "from-cookie");
    let api = ScriptedTransport::new(vec![response]);
    let mut ctx = TestContext::from_stamp(2);
    assert!(LoginStep::new(api).run(&mut ctx).is_pass());
    assert_eq!(ctx.auth_token(), Some("from-cookie"));
}

#[test]
fn login_without_token_or_agency_fails_and_leaves_context_untouched() {
    let api = ScriptedTransport::new(vec![ApiResponse::new(json!({"success": true, "agency": {"_id": "a1"}}), 200),
                                          ApiResponse::new(json!({"success": true, "token": "t"}), 200),
                                          ApiResponse::new(json!({"success": false, "message": "Your registration is pending admin approval."}), 403)]);
    let step = LoginStep::new(api);
    let mut ctx = TestContext::from_stamp(3);
    for _ in 0..3 {
        assert!(matches!(step.run(&mut ctx), StepRunResult::Failed { .. }));
    }
    assert!(ctx.auth_token().is_none());
    assert!(ctx.agency_id().is_none());
}

#[test]
fn default_locations_exact_count() {
    let api = ScriptedTransport::new(vec![locations(2), locations(3), ApiResponse::new(json!({"success": true}), 200)]);
    let step = VerifyLocationCountStep::new("verify_default_locations", "Verify Default Locations Created", api.clone(),
                                            LocationCountExpectation::default_locations(2)).recording_baseline();
    let mut ctx = logged_in_context();

    assert!(step.run(&mut ctx).is_pass());
    assert_eq!(ctx.baseline_locations(), Some(2));
    let calls = api.calls();
    assert_eq!(calls[0].path, "/inventory/stock-locations");
    assert_eq!(calls[0].header("Authorization"), Some("Bearer tok"));

    // 3 != 2: igualdad exacta, no umbral
    assert!(matches!(step.run(&mut ctx), StepRunResult::Failed { .. }));
    // sin bloque de paginación el total se lee como 0
    match step.run(&mut ctx) {
        StepRunResult::Failed { observed: Some(o), .. } => assert_eq!(o["total"], 0),
        other => panic!("expected clean failure, got {other:?}"),
    }
}

#[test]
fn location_checks_without_token_are_not_verifiable() {
    let api = ScriptedTransport::new(vec![]);
    let step = VerifyLocationCountStep::new("v", "v", api.clone(), LocationCountExpectation::default_locations(2));
    let mut ctx = TestContext::from_stamp(4);
    assert!(matches!(step.run(&mut ctx), StepRunResult::NotVerifiable { .. }));
    assert!(api.calls().is_empty(), "no request without credentials");
}

#[test]
fn vehicle_dependent_checks_degrade_without_vehicle() {
    let api = ScriptedTransport::new(vec![locations(1)]);
    let step = VerifyLocationCountStep::new("verify_vehicle_location", "Verify Vehicle Location Auto-Created", api.clone(),
                                            LocationCountExpectation::vehicle_locations(1)).requiring_vehicle();
    let mut ctx = logged_in_context();
    assert!(matches!(step.run(&mut ctx), StepRunResult::NotVerifiable { .. }));

    ctx.record_vehicle(Some("v1".into()), "loc-1".into());
    assert!(step.run(&mut ctx).is_pass());
    assert_eq!(api.calls()[0].path, "/inventory/stock-locations?type=VEHICLE");
}

#[test]
fn observed_baseline_shifts_total_expectation() {
    let api = ScriptedTransport::new(vec![locations(6)]);
    let step = VerifyLocationCountStep::new("verify_total_locations", "Verify Total Locations", api.clone(),
                                            LocationCountExpectation::total_after_vehicle(3)).requiring_vehicle()
                                                                                             .relative_to_baseline(1);
    let mut ctx = logged_in_context();
    ctx.record_vehicle(None, "loc-1".into());
    assert!(matches!(step.run(&mut ctx), StepRunResult::NotVerifiable { .. }), "no baseline yet");

    ctx.record_baseline(5);
    assert!(step.run(&mut ctx).is_pass());
}

#[test]
fn unbounded_baseline_is_not_verifiable() {
    let api = ScriptedTransport::new(vec![locations(u64::MAX)]);
    let step = VerifyLocationCountStep::new("verify_total_locations", "Verify Total Locations", api.clone(),
                                            LocationCountExpectation::total_after_vehicle(3)).requiring_vehicle()
                                                                                             .relative_to_baseline(1);
    let mut ctx = logged_in_context();
    ctx.record_vehicle(None, "loc-1".into());
    ctx.record_baseline(u64::MAX);
    match step.run(&mut ctx) {
        StepRunResult::NotVerifiable { reason } => assert!(reason.contains("cannot be extended")),
        other => panic!("expected not verifiable, got {other:?}"),
    }
    assert!(api.calls().is_empty());
}

#[test]
fn create_vehicle_records_linked_location() {
    let api = ScriptedTransport::new(vec![vehicle_ok("veh-1", "loc-7")]);
    let step = CreateVehicleStep::new(api.clone(), VehicleRequest::default());
    let mut ctx = logged_in_context();

    assert_eq!(step.severity(), StepSeverity::Soft);
    assert!(step.run(&mut ctx).is_pass());
    assert_eq!(ctx.vehicle_id(), Some("veh-1"));
    assert_eq!(ctx.stock_location_id(), Some("loc-7"));
    let call = &api.calls()[0];
    assert_eq!(call.path, "/inventory/vehicle");
    assert_eq!(call.body.as_ref().unwrap()["vehicleType"], "TEMPO");
}

#[test]
fn create_vehicle_without_linked_location_fails() {
    let api = ScriptedTransport::new(vec![ApiResponse::new(json!({"success": true, "vehicle": {"_id": "veh-1"}}), 201),
                                          ApiResponse::new(json!({"success": false, "message": "Vehicle with this registration number already exists"}), 400)]);
    let step = CreateVehicleStep::new(api, VehicleRequest::default());
    let mut ctx = logged_in_context();
    assert!(matches!(step.run(&mut ctx), StepRunResult::Failed { .. }));
    assert!(matches!(step.run(&mut ctx), StepRunResult::Failed { .. }));
    assert!(!ctx.has_vehicle_location());
    assert!(ctx.vehicle_id().is_none());
}

#[test]
fn transport_errors_are_clean_failures() {
    let api: Rc<dyn Transport> = ScriptedTransport::new(vec![]);
    let mut ctx = TestContext::from_stamp(9);
    assert!(matches!(RegisterStep::new(api.clone()).run(&mut ctx), StepRunResult::Failed { .. }));
    assert!(matches!(LoginStep::new(api).run(&mut ctx), StepRunResult::Failed { .. }));
}
