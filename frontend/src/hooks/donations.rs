//! 捐赠数据钩子

use crate::auth::{AuthContext, use_auth};
use crate::supabase::SupabaseClient;
use async_trait::async_trait;
use foodbridge_shared::{DonationWithDonor, NewDonation};
use leptos::prelude::*;

/// 捐赠表的存取出口
///
/// 钩子经由它落库和拉取，写入与刷新的次序可以脱离具体后端验证。
#[async_trait(?Send)]
pub trait DonationStore {
    async fn create(&self, donation: &NewDonation) -> Result<(), String>;
    async fn fetch_available(&self) -> Result<Vec<DonationWithDonor>, String>;
}

#[async_trait(?Send)]
impl DonationStore for SupabaseClient {
    async fn create(&self, donation: &NewDonation) -> Result<(), String> {
        self.create_donation(donation).await.map(|_| ())
    }

    async fn fetch_available(&self) -> Result<Vec<DonationWithDonor>, String> {
        self.get_donations().await
    }
}

/// 认证守卫：给待插入的捐赠打上捐赠者 ID
///
/// 未登录时直接拒绝，保证任何写操作在无会话状态下不会碰网络。
pub fn tag_donor(donation: NewDonation, user_id: Option<&str>) -> Result<NewDonation, String> {
    let user_id = user_id.ok_or_else(|| "User not authenticated".to_string())?;
    Ok(NewDonation {
        donor_id: Some(user_id.to_string()),
        ..donation
    })
}

/// 先落库再拉取；创建失败直接返回，不发起多余的拉取
///
/// 外层 Result 表示提交本身，内层表示提交成功后的缓存刷新，
/// 刷新失败不影响已经落库的事实。
pub async fn add_donation<S: DonationStore>(
    store: &S,
    donation: NewDonation,
    user_id: Option<&str>,
) -> Result<Result<Vec<DonationWithDonor>, String>, String> {
    let donation = tag_donor(donation, user_id)?;
    store.create(&donation).await?;
    Ok(store.fetch_available().await)
}

/// 可领取捐赠列表的钩子句柄
///
/// 认证上下文在创建时捕获，方法可以在 `spawn_local` 任务里调用。
#[derive(Clone, Copy)]
pub struct UseDonations {
    auth: AuthContext,
    pub donations: RwSignal<Vec<DonationWithDonor>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl UseDonations {
    /// 重新拉取可领取的捐赠列表
    pub async fn refetch(&self) {
        let client = self.auth.state.get_untracked().client.clone();

        self.loading.set(true);
        self.apply(client.fetch_available().await);
        self.loading.set(false);
    }

    /// 提交新捐赠；成功后用一次全新拉取覆盖缓存
    pub async fn add(&self, donation: NewDonation) -> Result<(), String> {
        let state = self.auth.state.get_untracked();
        let refreshed = add_donation(
            &state.client,
            donation,
            state.user.as_ref().map(|u| u.id.as_str()),
        )
        .await?;
        self.apply(refreshed);
        Ok(())
    }

    fn apply(&self, refreshed: Result<Vec<DonationWithDonor>, String>) {
        match refreshed {
            Ok(list) => {
                self.donations.set(list);
                self.error.set(None);
            }
            Err(e) => {
                web_sys::console::log_1(&format!("[Data] donations fetch failed: {}", e).into());
                self.error.set(Some(e));
            }
        }
    }
}

/// 创建捐赠列表钩子并触发首次加载
pub fn use_donations() -> UseDonations {
    let hook = UseDonations {
        auth: use_auth(),
        donations: RwSignal::new(Vec::new()),
        loading: RwSignal::new(true),
        error: RwSignal::new(None),
    };

    leptos::task::spawn_local(async move {
        hook.refetch().await;
    });

    hook
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodbridge_shared::DonationStatus;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn draft() -> NewDonation {
        NewDonation {
            donor_id: None,
            title: "Rice bags".to_string(),
            description: None,
            food_type: "Grains".to_string(),
            quantity: "5 kg".to_string(),
            pickup_address: "12 Lake Road".to_string(),
            image_url: None,
            status: DonationStatus::Available,
        }
    }

    struct TestStore {
        log: Rc<RefCell<Vec<String>>>,
        fail_create: bool,
    }

    #[async_trait(?Send)]
    impl DonationStore for TestStore {
        async fn create(&self, _donation: &NewDonation) -> Result<(), String> {
            self.log.borrow_mut().push("create".to_string());
            if self.fail_create {
                return Err("insert rejected".to_string());
            }
            Ok(())
        }

        async fn fetch_available(&self) -> Result<Vec<DonationWithDonor>, String> {
            self.log.borrow_mut().push("fetch".to_string());
            Ok(Vec::new())
        }
    }

    #[test]
    fn guard_rejects_unauthenticated_donor() {
        let err = tag_donor(draft(), None).unwrap_err();
        assert_eq!(err, "User not authenticated");
    }

    #[test]
    fn guard_stamps_the_session_user() {
        let tagged = tag_donor(draft(), Some("user-9")).unwrap();
        assert_eq!(tagged.donor_id.as_deref(), Some("user-9"));
        assert_eq!(tagged.title, "Rice bags");
    }

    #[tokio::test]
    async fn a_successful_create_is_followed_by_a_fresh_fetch() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let store = TestStore {
            log: log.clone(),
            fail_create: false,
        };

        let refreshed = add_donation(&store, draft(), Some("user-9")).await.unwrap();

        assert!(refreshed.is_ok());
        assert_eq!(*log.borrow(), ["create", "fetch"]);
    }

    #[tokio::test]
    async fn a_failed_create_skips_the_fetch() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let store = TestStore {
            log: log.clone(),
            fail_create: true,
        };

        let err = add_donation(&store, draft(), Some("user-9")).await.unwrap_err();

        assert_eq!(err, "insert rejected");
        assert_eq!(*log.borrow(), ["create"]);
    }

    #[tokio::test]
    async fn an_unauthenticated_add_never_reaches_the_store() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let store = TestStore {
            log: log.clone(),
            fail_create: false,
        };

        let err = add_donation(&store, draft(), None).await.unwrap_err();

        assert_eq!(err, "User not authenticated");
        assert!(log.borrow().is_empty());
    }
}
