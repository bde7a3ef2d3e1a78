use super::*;
use crate::workflow::adapter::DemoDispatch;
use async_trait::async_trait;
use foodbridge_shared::FoodRequest;
use foodbridge_shared::RequestStatus;
use std::cell::RefCell;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

struct TestContext {
    /// Operation log to verify calls and payloads
    log: RefCell<Vec<String>>,
    /// Captured requests as the backend would receive them
    submitted: RefCell<Vec<NewRequest>>,
    /// Simulate a backend failure on the next submit
    fail_submit: RefCell<bool>,
}

impl TestContext {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            log: RefCell::new(Vec::new()),
            submitted: RefCell::new(Vec::new()),
            fail_submit: RefCell::new(false),
        })
    }
}

struct TestGateway {
    ctx: Rc<TestContext>,
}

#[async_trait(?Send)]
impl RequestGateway for TestGateway {
    async fn submit(&self, request: NewRequest) -> Result<FoodRequest, String> {
        self.ctx
            .log
            .borrow_mut()
            .push(format!("submit:{:?}", request.service_type));
        if *self.ctx.fail_submit.borrow() {
            return Err("database unavailable".to_string());
        }
        let created = FoodRequest {
            id: "req-1".to_string(),
            receiver_id: "user-1".to_string(),
            donation_id: request.donation_id.clone(),
            requested_items: request.requested_items.clone(),
            delivery_address: request.delivery_address.clone(),
            service_type: request.service_type,
            status: RequestStatus::Pending,
            payment_status: request.payment_status,
            payment_amount: Some(request.payment_amount),
            delivery_boy_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        self.ctx.submitted.borrow_mut().push(request);
        Ok(created)
    }
}

fn setup() -> (Rc<TestContext>, TestGateway, ReceiveFlow) {
    let ctx = TestContext::new();
    let gateway = TestGateway { ctx: ctx.clone() };
    (ctx, gateway, ReceiveFlow::new())
}

// =========================================================
// Entry guards
// =========================================================

#[test]
fn begin_requires_a_signed_in_user() {
    let (_, _, mut flow) = setup();
    flow.toggle_item("Fresh Vegetables");

    flow.begin(false);

    assert_eq!(flow.step(), ReceiveStep::Idle);
    assert_eq!(flow.take_notice().as_deref(), Some("Please login to request food"));
}

#[test]
fn begin_requires_at_least_one_item() {
    let (_, _, mut flow) = setup();

    flow.begin(true);

    assert_eq!(flow.step(), ReceiveStep::Idle);
    assert_eq!(
        flow.take_notice().as_deref(),
        Some("Please select at least one food item")
    );
}

#[test]
fn toggle_adds_and_removes_items() {
    let (_, _, mut flow) = setup();

    flow.toggle_item("Fresh Vegetables");
    flow.toggle_item("Dairy Products");
    assert!(flow.is_selected("Fresh Vegetables"));
    assert_eq!(flow.selected_items().len(), 2);

    flow.toggle_item("Fresh Vegetables");
    assert!(!flow.is_selected("Fresh Vegetables"));
    assert_eq!(flow.selected_items(), ["Dairy Products"]);
}

// =========================================================
// Self service
// =========================================================

#[tokio::test]
async fn self_service_submits_a_free_paid_request() {
    let (ctx, gateway, mut flow) = setup();
    flow.toggle_item("Fresh Vegetables");
    flow.toggle_item("Bread & Bakery Items");
    flow.begin(true);
    assert_eq!(flow.step(), ReceiveStep::ServiceChoice);

    flow.choose_self_service(&gateway, &DemoDispatch, Some("45 Hill Street"))
        .await;

    let submitted = ctx.submitted.borrow();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].service_type, ServiceType::SelfService);
    assert_eq!(submitted[0].payment_status, PaymentStatus::Paid);
    assert_eq!(submitted[0].payment_amount, 0.0);
    assert_eq!(submitted[0].delivery_address, "45 Hill Street");
    assert_eq!(
        submitted[0].requested_items,
        ["Fresh Vegetables", "Bread & Bakery Items"]
    );
    // receiver_id is stamped later by the data hook
    assert!(submitted[0].receiver_id.is_none());
    drop(submitted);

    assert_eq!(flow.step(), ReceiveStep::Idle);
    assert!(flow.selected_items().is_empty());
    let notice = flow.take_notice().unwrap();
    assert!(notice.contains("Request submitted successfully!"));
    assert!(notice.contains("Fresh Vegetables, Bread & Bakery Items"));
    assert!(notice.contains("123 Main Street, Downtown"));
    assert!(notice.contains("2:00 PM - 6:00 PM"));
}

#[tokio::test]
async fn self_service_falls_back_to_pickup_placeholder_address() {
    let (ctx, gateway, mut flow) = setup();
    flow.toggle_item("Canned Goods");
    flow.begin(true);

    flow.choose_self_service(&gateway, &DemoDispatch, None).await;

    assert_eq!(ctx.submitted.borrow()[0].delivery_address, "Self pickup");
}

#[tokio::test]
async fn self_service_failure_keeps_the_service_choice_open() {
    let (ctx, gateway, mut flow) = setup();
    flow.toggle_item("Fruits");
    flow.begin(true);
    *ctx.fail_submit.borrow_mut() = true;

    flow.choose_self_service(&gateway, &DemoDispatch, None).await;

    assert_eq!(flow.step(), ReceiveStep::ServiceChoice);
    assert_eq!(flow.selected_items(), ["Fruits"]);
    assert_eq!(
        flow.take_notice().as_deref(),
        Some("Error submitting request: database unavailable")
    );
}

// =========================================================
// Platform service
// =========================================================

#[tokio::test]
async fn platform_service_walks_details_payment_and_tracking() {
    let (ctx, gateway, mut flow) = setup();
    flow.toggle_item("Dairy Products");
    flow.begin(true);

    flow.choose_platform_service();
    assert_eq!(flow.step(), ReceiveStep::DetailsForm);

    flow.submit_details(ReceiverDetails {
        name: "A".to_string(),
        mobile: "9999999999".to_string(),
        address: "X".to_string(),
    });
    assert_eq!(flow.step(), ReceiveStep::Payment);

    flow.confirm_payment(&gateway).await;

    let submitted = ctx.submitted.borrow();
    assert_eq!(submitted[0].service_type, ServiceType::PlatformService);
    assert_eq!(submitted[0].payment_amount, 59.0);
    assert_eq!(submitted[0].payment_status, PaymentStatus::Paid);
    assert_eq!(submitted[0].delivery_address, "X");
    drop(submitted);

    assert_eq!(flow.step(), ReceiveStep::Tracking);
    assert!(flow.selected_items().is_empty());
    assert_eq!(flow.details(), &ReceiverDetails::default());

    flow.close_tracking();
    assert_eq!(flow.step(), ReceiveStep::Idle);
}

#[tokio::test]
async fn a_second_platform_run_does_not_reuse_the_previous_delivery_details() {
    let (ctx, gateway, mut flow) = setup();
    flow.toggle_item("Fruits");
    flow.begin(true);
    flow.choose_platform_service();
    flow.submit_details(ReceiverDetails {
        name: "A".to_string(),
        mobile: "9999999999".to_string(),
        address: "Old Lane".to_string(),
    });
    flow.confirm_payment(&gateway).await;
    flow.close_tracking();
    assert_eq!(flow.details(), &ReceiverDetails::default());

    // the second run must carry the freshly entered address
    flow.toggle_item("Canned Goods");
    flow.begin(true);
    flow.choose_platform_service();
    flow.submit_details(ReceiverDetails {
        name: "B".to_string(),
        mobile: "8888888888".to_string(),
        address: "New Lane".to_string(),
    });
    flow.confirm_payment(&gateway).await;

    let submitted = ctx.submitted.borrow();
    assert_eq!(submitted.len(), 2);
    assert_eq!(submitted[1].delivery_address, "New Lane");
}

#[test]
fn incomplete_details_are_rejected() {
    let (_, _, mut flow) = setup();
    flow.toggle_item("Fruits");
    flow.begin(true);
    flow.choose_platform_service();

    flow.submit_details(ReceiverDetails {
        name: "A".to_string(),
        mobile: String::new(),
        address: "X".to_string(),
    });

    assert_eq!(flow.step(), ReceiveStep::DetailsForm);
    assert_eq!(
        flow.take_notice().as_deref(),
        Some("Please fill all required fields")
    );
}

#[tokio::test]
async fn payment_failure_keeps_the_payment_step_open() {
    let (ctx, gateway, mut flow) = setup();
    flow.toggle_item("Fruits");
    flow.begin(true);
    flow.choose_platform_service();
    flow.submit_details(ReceiverDetails {
        name: "A".to_string(),
        mobile: "9999999999".to_string(),
        address: "X".to_string(),
    });
    *ctx.fail_submit.borrow_mut() = true;

    flow.confirm_payment(&gateway).await;

    assert_eq!(flow.step(), ReceiveStep::Payment);
    assert_eq!(flow.selected_items(), ["Fruits"]);
    assert_eq!(
        flow.take_notice().as_deref(),
        Some("Error processing payment: database unavailable")
    );
}

#[test]
fn cancel_returns_to_idle_but_keeps_the_selection() {
    let (_, _, mut flow) = setup();
    flow.toggle_item("Fruits");
    flow.begin(true);

    flow.cancel();

    assert_eq!(flow.step(), ReceiveStep::Idle);
    assert_eq!(flow.selected_items(), ["Fruits"]);
}
