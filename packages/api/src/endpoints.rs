//! One method per API endpoint the console calls.
//!
//! List endpoints return the raw [`Envelope`] so views can tell an empty
//! result (with the server's message) from a failure; see
//! [`crate::ListState`]. Account calls that change the session (login,
//! logout and avatar change) update the [`store::SessionStore`] themselves.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use store::Profile;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::forms::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::gateway::Gateway;
use crate::models::{
    avatar_ref, Category, CategoryRevenue, Customer, ExportInvoice, ExportLine, ImportInvoice,
    ImportLine, LoginData, MemberRole, Product, StockItem, StockShare, Supplier, UserAccount,
    Warehouse, WarehouseMember,
};
use crate::transport::{Method, Transport};

type Rows<R> = Result<Envelope<Vec<R>>, ApiError>;

impl<T: Transport> Gateway<T> {
    /// Sign in and persist the session. Returns the cached profile.
    pub async fn login(&self, request: &LoginRequest) -> Result<Profile, ApiError> {
        let envelope: Envelope<LoginData> = self.post("/auth/login", request).await?;
        let data = envelope
            .data
            .filter(|d| !d.token.is_empty())
            .ok_or_else(|| ApiError::Transport("login response carried no token".to_string()))?;
        let (profile, token) = data.into_session();
        self.session().save(profile.clone(), token);
        tracing::info!(user = %profile.id, "signed in");
        Ok(profile)
    }

    /// Create an account. Only a `201` counts as success; the server's
    /// message is returned for display.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let envelope = self.command("/auth/register", request).await?;
        if envelope.status_code == 201 {
            Ok(envelope.message)
        } else {
            Err(ApiError::Rejected {
                status: envelope.status_code,
                message: envelope.message,
            })
        }
    }

    pub fn logout(&self) {
        tracing::info!("signing out");
        self.session().clear();
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<String, ApiError> {
        Ok(self.command("/auth/changePassword", request).await?.message)
    }

    /// Upload a new avatar and point the cached profile at it.
    pub async fn change_avatar(&self, image: &[u8]) -> Result<String, ApiError> {
        let body = json!({ "pictureContent": STANDARD.encode(image) });
        let envelope: Envelope<String> = self.post("/auth/changeProfilePicture", &body).await?;
        let avatar = avatar_ref(envelope.data.as_deref());
        self.session().update_profile(|profile| profile.avatar_ref = avatar);
        Ok(envelope.message)
    }

    pub async fn accounts(&self) -> Rows<UserAccount> {
        self.get("/auth/getalluser").await
    }

    pub async fn toggle_lock(&self, user_id: &str) -> Result<Envelope<Value>, ApiError> {
        self.send(Method::Post, &format!("/auth/lock/{user_id}"), None)
            .await
    }

    pub async fn categories(&self) -> Rows<Category> {
        self.get("/cate/getall").await
    }

    pub async fn products(&self) -> Rows<Product> {
        self.get("/product/pd").await
    }

    pub async fn suppliers(&self) -> Rows<Supplier> {
        self.get("/supplier/getsup").await
    }

    pub async fn customers(&self) -> Rows<Customer> {
        self.get("/cust/getall").await
    }

    pub async fn warehouses(&self) -> Rows<Warehouse> {
        self.get("/warehouse/getall").await
    }

    pub async fn stock(&self, warehouse: i64) -> Rows<StockItem> {
        self.get(&format!("/item/storage/{warehouse}")).await
    }

    pub async fn imports(&self, warehouse: i64) -> Rows<ImportInvoice> {
        self.get(&format!("/import/{warehouse}")).await
    }

    pub async fn import_detail(&self, invoice: i64) -> Rows<ImportLine> {
        self.get(&format!("/import/importDetail/{invoice}")).await
    }

    pub async fn exports(&self, warehouse: i64) -> Rows<ExportInvoice> {
        self.get(&format!("/export/{warehouse}")).await
    }

    pub async fn export_detail(&self, invoice: i64) -> Rows<ExportLine> {
        self.get(&format!("/export/exportDetail/{invoice}")).await
    }

    /// Codes of the warehouses whose members the caller may manage.
    pub async fn storage_codes(&self) -> Rows<String> {
        self.get("/warehouse/getcode").await
    }

    pub async fn members(&self, code: &str) -> Rows<WarehouseMember> {
        self.get_with("/warehouse/members", vec![("Code", code.to_string())])
            .await
    }

    pub async fn change_member_role(
        &self,
        member: i64,
        role: MemberRole,
    ) -> Result<Envelope<Value>, ApiError> {
        let body = json!({ "Id": member, "roleId": role.id() });
        self.command("/warehouse/crole", &body).await
    }

    pub async fn add_member(&self, code: &str, user_name: &str) -> Result<Envelope<Value>, ApiError> {
        let body = json!({ "code": code, "userName": user_name.trim() });
        self.command("/warehouse/addMember", &body).await
    }

    pub async fn stock_shares(&self, warehouse: i64) -> Rows<StockShare> {
        self.get(&format!("/stat/pie/{warehouse}")).await
    }

    pub async fn category_revenue(&self, warehouse: i64) -> Rows<CategoryRevenue> {
        self.get_with(
            "/stat/category-revenue",
            vec![("warehouseId", warehouse.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use store::{claims, MemoryStore, Role, SessionStore};

    use super::*;
    use crate::forms::{LoginForm, RegisterForm};
    use crate::gateway::tests::{live_token, signed_in, token_with};
    use crate::transport::testing::RecordingTransport;

    fn signed_out() -> (Gateway<RecordingTransport>, RecordingTransport) {
        let transport = RecordingTransport::default();
        let gateway = Gateway::new(SessionStore::open(MemoryStore::new()), transport.clone());
        (gateway, transport)
    }

    #[tokio::test]
    async fn test_login_saves_session() {
        let (gateway, transport) = signed_out();
        let token = token_with(json!({ "exp": claims::now_epoch_secs() + 60, "role": "Admin" }));
        transport.reply(
            200,
            "Login successful",
            json!({ "id": 1, "token": token, "userName": "root", "avatar": "def" }),
        );
        let request = LoginForm {
            username: "root".to_string(),
            password: "secret1".to_string(),
        }
        .validate()
        .unwrap();

        let profile = gateway.login(&request).await.unwrap();

        assert_eq!(profile.role, Role::Admin);
        assert_eq!(profile.display_name, "root");
        let session = gateway.session().session();
        assert_eq!(session.token.as_deref(), Some(token.as_str()));
        assert!(session.is_admin());
        let sent = transport.sent();
        assert_eq!(sent[0].path, "/auth/login");
        assert_eq!(sent[0].bearer, None);
        assert_eq!(
            sent[0].body,
            Some(json!({ "username": "root", "password": "secret1" }))
        );
    }

    #[tokio::test]
    async fn test_login_without_token_fails() {
        let (gateway, transport) = signed_out();
        transport.reply(200, "ok", json!({ "userName": "root" }));
        let request = LoginForm {
            username: "root".to_string(),
            password: "secret1".to_string(),
        }
        .validate()
        .unwrap();

        assert!(matches!(gateway.login(&request).await, Err(ApiError::Transport(_))));
        assert!(gateway.session().token().is_none());
    }

    #[tokio::test]
    async fn test_register_needs_201() {
        let (gateway, transport) = signed_out();
        transport
            .reply(201, "Account created", Value::Null)
            .reply(200, "Username taken", Value::Null);
        let request = RegisterForm {
            username: "ada".to_string(),
            password: "secret1".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(gateway.register(&request).await.unwrap(), "Account created");
        assert_eq!(
            gateway.register(&request).await,
            Err(ApiError::Rejected {
                status: 200,
                message: "Username taken".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (gateway, _) = signed_in(live_token());
        gateway.logout();
        assert_eq!(gateway.session().session(), store::Session::default());
    }

    #[tokio::test]
    async fn test_change_avatar_updates_profile_only() {
        let token = live_token();
        let (gateway, transport) = signed_in(token.clone());
        transport.reply(200, "Avatar updated", json!("https://cdn.example/a.png"));

        let message = gateway.change_avatar(b"\x89PNG").await.unwrap();

        assert_eq!(message, "Avatar updated");
        let session = gateway.session().session();
        assert_eq!(session.token, Some(token));
        assert_eq!(
            session.profile.unwrap().avatar_ref.as_deref(),
            Some("https://cdn.example/a.png")
        );
        assert_eq!(
            transport.sent()[0].body,
            Some(json!({ "pictureContent": STANDARD.encode(b"\x89PNG") }))
        );
    }

    #[tokio::test]
    async fn test_member_role_body() {
        let (gateway, transport) = signed_in(live_token());
        transport.reply(200, "Role updated", Value::Null);

        gateway.change_member_role(12, MemberRole::Owner).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].path, "/warehouse/crole");
        assert_eq!(sent[0].body, Some(json!({ "Id": 12, "roleId": 1 })));
    }

    #[tokio::test]
    async fn test_list_paths() {
        let (gateway, transport) = signed_in(live_token());
        for _ in 0..4 {
            transport.reply(200, "", json!([]));
        }

        gateway.members("WH 1").await.unwrap();
        gateway.category_revenue(3).await.unwrap();
        gateway.toggle_lock("u-9").await.unwrap();
        gateway.export_detail(44).await.unwrap();

        let sent = transport.sent();
        let paths: Vec<_> = sent.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "/warehouse/members",
                "/stat/category-revenue",
                "/auth/lock/u-9",
                "/export/exportDetail/44",
            ]
        );
        assert_eq!(sent[0].query, vec![("Code", "WH 1".to_string())]);
        assert_eq!(sent[1].query, vec![("warehouseId", "3".to_string())]);
        assert!(sent[2].query.is_empty());
        assert_eq!(sent[2].method, Method::Post);
        assert!(sent.iter().all(|r| r.bearer.is_some()));
    }
}
