//! 食品请求数据钩子

use crate::auth::{AuthContext, use_auth};
use crate::supabase::SupabaseClient;
use async_trait::async_trait;
use foodbridge_shared::{FoodRequest, NewRequest, RequestStatus, RequestWithDonation};
use leptos::prelude::*;

/// 请求表的存取出口
///
/// 钩子经由它落库和拉取，写入与刷新的次序可以脱离具体后端验证。
#[async_trait(?Send)]
pub trait RequestStore {
    async fn create(&self, request: &NewRequest) -> Result<FoodRequest, String>;
    async fn set_status(&self, request_id: &str, status: RequestStatus) -> Result<(), String>;
    async fn fetch_for(&self, receiver_id: &str) -> Result<Vec<RequestWithDonation>, String>;
}

#[async_trait(?Send)]
impl RequestStore for SupabaseClient {
    async fn create(&self, request: &NewRequest) -> Result<FoodRequest, String> {
        self.create_request(request).await
    }

    async fn set_status(&self, request_id: &str, status: RequestStatus) -> Result<(), String> {
        self.update_request_status(request_id, status)
            .await
            .map(|_| ())
    }

    async fn fetch_for(&self, receiver_id: &str) -> Result<Vec<RequestWithDonation>, String> {
        self.get_user_requests(receiver_id).await
    }
}

/// 认证守卫：给待插入的请求打上接收者 ID
pub fn tag_receiver(request: NewRequest, user_id: Option<&str>) -> Result<NewRequest, String> {
    let user_id = user_id.ok_or_else(|| "User not authenticated".to_string())?;
    Ok(NewRequest {
        receiver_id: Some(user_id.to_string()),
        ..request
    })
}

/// 先落库再拉取；创建失败直接返回，不发起多余的拉取
///
/// 外层 Result 表示提交本身，内层表示提交成功后的缓存刷新，
/// 刷新失败不影响已经落库的事实。
pub async fn add_request<S: RequestStore>(
    store: &S,
    request: NewRequest,
    user_id: Option<&str>,
) -> Result<(FoodRequest, Result<Vec<RequestWithDonation>, String>), String> {
    let user_id = user_id.ok_or_else(|| "User not authenticated".to_string())?;
    let request = tag_receiver(request, Some(user_id))?;
    let created = store.create(&request).await?;
    Ok((created, store.fetch_for(user_id).await))
}

/// 改状态后同样拉取一次最新列表
pub async fn change_request_status<S: RequestStore>(
    store: &S,
    request_id: &str,
    status: RequestStatus,
    user_id: Option<&str>,
) -> Result<Result<Vec<RequestWithDonation>, String>, String> {
    let user_id = user_id.ok_or_else(|| "User not authenticated".to_string())?;
    store.set_status(request_id, status).await?;
    Ok(store.fetch_for(user_id).await)
}

/// 当前用户请求列表的钩子句柄
///
/// 认证上下文在创建时捕获，方法可以在 `spawn_local` 任务里调用。
#[derive(Clone, Copy)]
pub struct UseRequests {
    auth: AuthContext,
    pub requests: RwSignal<Vec<RequestWithDonation>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl UseRequests {
    /// 重新拉取当前用户的请求；未登录时清空列表
    pub async fn refetch(&self) {
        let state = self.auth.state.get_untracked();

        let Some(user) = state.user else {
            self.requests.set(Vec::new());
            self.loading.set(false);
            return;
        };

        self.loading.set(true);
        self.apply(state.client.fetch_for(&user.id).await);
        self.loading.set(false);
    }

    /// 提交新请求；成功后用一次全新拉取覆盖缓存，返回创建的行
    pub async fn add(&self, request: NewRequest) -> Result<FoodRequest, String> {
        let state = self.auth.state.get_untracked();
        let (created, refreshed) = add_request(
            &state.client,
            request,
            state.user.as_ref().map(|u| u.id.as_str()),
        )
        .await?;
        self.apply(refreshed);
        Ok(created)
    }

    /// 更新请求状态并刷新列表
    pub async fn update_status(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<(), String> {
        let state = self.auth.state.get_untracked();
        let refreshed = change_request_status(
            &state.client,
            request_id,
            status,
            state.user.as_ref().map(|u| u.id.as_str()),
        )
        .await?;
        self.apply(refreshed);
        Ok(())
    }

    fn apply(&self, refreshed: Result<Vec<RequestWithDonation>, String>) {
        match refreshed {
            Ok(list) => {
                self.requests.set(list);
                self.error.set(None);
            }
            Err(e) => {
                web_sys::console::log_1(&format!("[Data] requests fetch failed: {}", e).into());
                self.error.set(Some(e));
            }
        }
    }
}

/// 创建请求列表钩子；用户切换（登录 / 登出）时自动重新加载
pub fn use_requests() -> UseRequests {
    let auth = use_auth();
    let hook = UseRequests {
        auth,
        requests: RwSignal::new(Vec::new()),
        loading: RwSignal::new(true),
        error: RwSignal::new(None),
    };

    Effect::new(move |_| {
        // 订阅用户的变化
        let _ = auth.state.with(|s| s.user.as_ref().map(|u| u.id.clone()));
        leptos::task::spawn_local(async move {
            hook.refetch().await;
        });
    });

    hook
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodbridge_shared::{PaymentStatus, ServiceType};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn draft() -> NewRequest {
        NewRequest {
            receiver_id: None,
            donation_id: None,
            requested_items: vec!["Fresh Vegetables".to_string()],
            delivery_address: "Self pickup".to_string(),
            service_type: ServiceType::SelfService,
            payment_status: PaymentStatus::Paid,
            payment_amount: 0.0,
        }
    }

    struct TestStore {
        log: Rc<RefCell<Vec<String>>>,
        fail_create: bool,
    }

    #[async_trait(?Send)]
    impl RequestStore for TestStore {
        async fn create(&self, request: &NewRequest) -> Result<FoodRequest, String> {
            self.log.borrow_mut().push("create".to_string());
            if self.fail_create {
                return Err("insert rejected".to_string());
            }
            Ok(FoodRequest {
                id: "req-1".to_string(),
                receiver_id: request.receiver_id.clone().unwrap_or_default(),
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
            })
        }

        async fn set_status(&self, request_id: &str, _status: RequestStatus) -> Result<(), String> {
            self.log.borrow_mut().push(format!("status:{}", request_id));
            Ok(())
        }

        async fn fetch_for(&self, receiver_id: &str) -> Result<Vec<RequestWithDonation>, String> {
            self.log.borrow_mut().push(format!("fetch:{}", receiver_id));
            Ok(Vec::new())
        }
    }

    fn store_with_log(fail_create: bool) -> (Rc<RefCell<Vec<String>>>, TestStore) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let store = TestStore {
            log: log.clone(),
            fail_create,
        };
        (log, store)
    }

    #[test]
    fn guard_rejects_unauthenticated_receiver() {
        let err = tag_receiver(draft(), None).unwrap_err();
        assert_eq!(err, "User not authenticated");
    }

    #[test]
    fn guard_stamps_the_session_user() {
        let tagged = tag_receiver(draft(), Some("user-3")).unwrap();
        assert_eq!(tagged.receiver_id.as_deref(), Some("user-3"));
        assert_eq!(tagged.requested_items, vec!["Fresh Vegetables"]);
    }

    #[tokio::test]
    async fn a_successful_create_is_followed_by_a_fetch_for_the_same_user() {
        let (log, store) = store_with_log(false);

        let (created, refreshed) = add_request(&store, draft(), Some("user-3")).await.unwrap();

        assert_eq!(created.receiver_id, "user-3");
        assert!(refreshed.is_ok());
        assert_eq!(*log.borrow(), ["create", "fetch:user-3"]);
    }

    #[tokio::test]
    async fn a_failed_create_skips_the_fetch() {
        let (log, store) = store_with_log(true);

        let err = add_request(&store, draft(), Some("user-3")).await.unwrap_err();

        assert_eq!(err, "insert rejected");
        assert_eq!(*log.borrow(), ["create"]);
    }

    #[tokio::test]
    async fn an_unauthenticated_add_never_reaches_the_store() {
        let (log, store) = store_with_log(false);

        let err = add_request(&store, draft(), None).await.unwrap_err();

        assert_eq!(err, "User not authenticated");
        assert!(log.borrow().is_empty());
    }

    #[tokio::test]
    async fn a_status_update_refetches_the_list() {
        let (log, store) = store_with_log(false);

        let refreshed =
            change_request_status(&store, "req-1", RequestStatus::Cancelled, Some("user-3"))
                .await
                .unwrap();

        assert!(refreshed.is_ok());
        assert_eq!(*log.borrow(), ["status:req-1", "fetch:user-3"]);
    }

    #[tokio::test]
    async fn a_status_update_requires_a_signed_in_user() {
        let (log, store) = store_with_log(false);

        let err = change_request_status(&store, "req-1", RequestStatus::Cancelled, None)
            .await
            .unwrap_err();

        assert_eq!(err, "User not authenticated");
        assert!(log.borrow().is_empty());
    }
}
