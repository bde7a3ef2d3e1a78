use super::*;
use crate::supabase::UploadedFile;
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

struct TestContext {
    /// Operation log to verify calling order
    log: RefCell<Vec<String>>,
    /// Captured donation rows
    submitted: RefCell<Vec<NewDonation>>,
    fail_upload: RefCell<bool>,
    fail_submit: RefCell<bool>,
}

impl TestContext {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            log: RefCell::new(Vec::new()),
            submitted: RefCell::new(Vec::new()),
            fail_upload: RefCell::new(false),
            fail_submit: RefCell::new(false),
        })
    }
}

struct TestGateway {
    ctx: Rc<TestContext>,
}

#[async_trait(?Send)]
impl DonationGateway for TestGateway {
    type Proof = Vec<u8>;

    async fn upload_proof(
        &self,
        _proof: &Self::Proof,
        bucket: &str,
        path: &str,
    ) -> Result<UploadedFile, String> {
        self.ctx
            .log
            .borrow_mut()
            .push(format!("upload:{}/{}", bucket, path));
        if *self.ctx.fail_upload.borrow() {
            return Err("storage quota exceeded".to_string());
        }
        Ok(UploadedFile {
            path: format!("{}/{}", bucket, path),
            public_url: format!("https://cdn.example/{}/{}", bucket, path),
        })
    }

    async fn submit(&self, donation: NewDonation) -> Result<(), String> {
        self.ctx.log.borrow_mut().push("submit".to_string());
        if *self.ctx.fail_submit.borrow() {
            return Err("row level security violation".to_string());
        }
        self.ctx.submitted.borrow_mut().push(donation);
        Ok(())
    }
}

fn setup() -> (Rc<TestContext>, TestGateway) {
    let ctx = TestContext::new();
    let gateway = TestGateway { ctx: ctx.clone() };
    (ctx, gateway)
}

fn form() -> DonationFormData {
    DonationFormData {
        title: "Surplus lunch boxes".to_string(),
        food_type: "Cooked Food".to_string(),
        quantity: "20 boxes".to_string(),
        address: "7 Temple Street".to_string(),
        description: String::new(),
    }
}

fn proof() -> ProofImage<Vec<u8>> {
    ProofImage {
        data: vec![1, 2, 3],
        file_name: "boxes.jpg".to_string(),
    }
}

// =========================================================
// Validation
// =========================================================

#[tokio::test]
async fn rejects_unauthenticated_donor_before_any_io() {
    let (ctx, gateway) = setup();

    let err = submit_donation(&gateway, None, &form(), Some(&proof()), 1_000)
        .await
        .unwrap_err();

    assert_eq!(err, "Please login to submit a donation");
    assert!(ctx.log.borrow().is_empty());
}

#[tokio::test]
async fn rejects_incomplete_form() {
    let (ctx, gateway) = setup();
    let mut form = form();
    form.quantity = String::new();

    let err = submit_donation(&gateway, Some("user-1"), &form, Some(&proof()), 1_000)
        .await
        .unwrap_err();

    assert_eq!(err, "Please fill all required fields");
    assert!(ctx.log.borrow().is_empty());
}

#[tokio::test]
async fn rejects_missing_proof_image() {
    let (ctx, gateway) = setup();

    let err = submit_donation::<TestGateway>(&gateway, Some("user-1"), &form(), None, 1_000)
        .await
        .unwrap_err();

    assert_eq!(err, "Please upload an image of the food");
    assert!(ctx.log.borrow().is_empty());
}

// =========================================================
// Upload and row creation
// =========================================================

#[tokio::test]
async fn creates_the_row_only_after_a_successful_upload() {
    let (ctx, gateway) = setup();

    submit_donation(&gateway, Some("user-1"), &form(), Some(&proof()), 1_700_000)
        .await
        .unwrap();

    assert_eq!(
        *ctx.log.borrow(),
        ["upload:food-images/user-1/1700000_boxes.jpg", "submit"]
    );

    let submitted = ctx.submitted.borrow();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].status, DonationStatus::Available);
    assert_eq!(
        submitted[0].image_url.as_deref(),
        Some("https://cdn.example/food-images/user-1/1700000_boxes.jpg")
    );
    assert_eq!(submitted[0].description, None);
    // donor_id is stamped later by the data hook
    assert!(submitted[0].donor_id.is_none());
}

#[tokio::test]
async fn upload_failure_leaves_no_donation_row() {
    let (ctx, gateway) = setup();
    *ctx.fail_upload.borrow_mut() = true;

    let err = submit_donation(&gateway, Some("user-1"), &form(), Some(&proof()), 1_000)
        .await
        .unwrap_err();

    assert_eq!(err, "Error submitting donation: Failed to upload image");
    assert!(ctx.submitted.borrow().is_empty());
    assert!(!ctx.log.borrow().contains(&"submit".to_string()));
}

#[tokio::test]
async fn row_creation_failure_is_reported_with_the_backend_message() {
    let (ctx, gateway) = setup();
    *ctx.fail_submit.borrow_mut() = true;

    let err = submit_donation(&gateway, Some("user-1"), &form(), Some(&proof()), 1_000)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        "Error submitting donation: row level security violation"
    );
    assert!(ctx.submitted.borrow().is_empty());
}

#[test]
fn proof_paths_are_scoped_per_user_and_timestamped() {
    assert_eq!(
        proof_path("user-7", 42, "photo.png"),
        "user-7/42_photo.png"
    );
}
