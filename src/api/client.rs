//! MyFoodRepo API client
//!
//! Typed wrappers for each endpoint. Every call builds a path and payload,
//! hands it to the transport and decodes the response envelope.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::error::{ApiError, ApiResult};
use super::transport::{ApiRequest, HttpTransport, Transport};
use crate::config::ClientConfig;
use crate::device::{DeviceInfoSource, SystemDeviceInfo};
use crate::models::{
    image_data_uri, ApiResponse, DishData, DishesData, FoodData, InstallationInfo,
    NutrientsData, PartialUser, PatchDish, PostDish, RawData, RecognitionData, SessionData,
    SubjectsData, User, UserData,
};

/// Sort order used when listing dishes
pub const DEFAULT_DISH_SORT: &str = "eaten_at desc";

/// Only return dishes changed after this point
#[derive(Debug, Clone, PartialEq)]
pub enum LastSync {
    /// Passed through as received from a previous sync
    Raw(String),
    At(DateTime<Utc>),
}

impl LastSync {
    pub fn to_query_value(&self) -> String {
        match self {
            LastSync::Raw(s) => s.clone(),
            LastSync::At(at) => at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Options for listing dishes
#[derive(Debug, Clone, PartialEq)]
pub struct DishQuery {
    pub last_sync: Option<LastSync>,
    /// Ransack style sort, e.g. "eaten_at desc"; `None` for server order
    pub sort: Option<String>,
}

impl Default for DishQuery {
    fn default() -> Self {
        Self {
            last_sync: None,
            sort: Some(DEFAULT_DISH_SORT.to_string()),
        }
    }
}

impl DishQuery {
    pub fn since(last_sync: LastSync) -> Self {
        Self {
            last_sync: Some(last_sync),
            ..Default::default()
        }
    }
}

/// Path segment for a user, `me` when no id is given
fn user_segment(user_id: Option<i64>) -> String {
    match user_id {
        Some(id) => id.to_string(),
        None => "me".to_string(),
    }
}

/// Serialize a record, dropping its `id` (it travels in the path instead)
fn body_without_id<S: Serialize>(value: &S) -> ApiResult<Value> {
    let mut body = serde_json::to_value(value)?;
    if let Value::Object(map) = &mut body {
        map.remove("id");
    }
    Ok(body)
}

/// Client for one MyFoodRepo server
pub struct MfrClient<T: Transport = HttpTransport> {
    transport: T,
    device: Box<dyn DeviceInfoSource>,
    uuid: Option<String>,
    installation: Option<InstallationInfo>,
    session_token: Option<String>,
    timeout: Option<Duration>,
}

impl MfrClient<HttpTransport> {
    /// Create a client talking HTTP to the configured server
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut client = Self::with_transport(HttpTransport::new(config)?);
        client.uuid = config.installation_uuid.clone();
        Ok(client)
    }
}

impl<T: Transport> MfrClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            device: Box::new(SystemDeviceInfo),
            uuid: None,
            installation: None,
            session_token: None,
            timeout: None,
        }
    }

    /// Replace the source of device fields sent with installation reports
    pub fn with_device_info(mut self, device: impl DeviceInfoSource + 'static) -> Self {
        self.device = Box::new(device);
        self
    }

    /// Timeout for subsequent calls, `None` to use the transport default
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Restore a session saved from an earlier login
    pub fn set_session_token(&mut self, token: Option<String>) {
        self.session_token = token;
    }

    pub fn installation_uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session_token.is_some()
    }

    async fn send<D: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<ApiResponse<D>> {
        let request = request.with_timeout(self.timeout);
        let value = self
            .transport
            .execute(request, self.session_token.as_deref())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    // ========================================================================
    // Installation
    // ========================================================================

    /// Report this installation; must precede login
    ///
    /// Device fields are collected on the first report and reused afterwards.
    pub async fn report_installation(
        &mut self,
        uuid: &str,
        extra: BTreeMap<String, String>,
    ) -> ApiResult<ApiResponse<RawData>> {
        self.uuid = Some(uuid.to_string());

        let installation = match &self.installation {
            Some(info) => info.clone(),
            None => {
                let info = InstallationInfo::new(self.device.device_info(), extra);
                self.installation = Some(info.clone());
                info
            }
        };

        tracing::info!(uuid = %uuid, "Reporting installation");
        let request = ApiRequest::patch(format!("installations/{}", uuid))
            .with_body(json!({ "installation": installation }));
        self.send(request).await
    }

    // ========================================================================
    // Users and sessions
    // ========================================================================

    pub async fn create_user(&self, user: &User) -> ApiResult<ApiResponse<RawData>> {
        let request = ApiRequest::post("users").with_body(json!({ "user": user }));
        self.send(request).await
    }

    /// Delete the logged in user
    pub async fn delete_user(&self) -> ApiResult<ApiResponse<RawData>> {
        self.send(ApiRequest::delete("users/me")).await
    }

    pub async fn get_user(&self, user_id: Option<i64>) -> ApiResult<ApiResponse<UserData>> {
        self.send(ApiRequest::get(format!("users/{}", user_segment(user_id))))
            .await
    }

    /// Update profile fields of `user.profile.id`, or of the logged in user
    pub async fn update_user(&self, user: &PartialUser) -> ApiResult<ApiResponse<RawData>> {
        let request = ApiRequest::patch(format!("users/{}", user_segment(user.profile.id)))
            .with_body(json!({ "user": user }));
        self.send(request).await
    }

    /// Change email and/or password; `password` must hold the current one
    pub async fn update_user_login(&self, user: &PartialUser) -> ApiResult<ApiResponse<RawData>> {
        let request = ApiRequest::patch(format!(
            "users/{}/update_email_password",
            user_segment(user.profile.id)
        ))
        .with_body(json!({ "user": user }));
        self.send(request).await
    }

    /// Open a session; the token is kept for subsequent calls
    pub async fn log_in(&mut self, user: &User) -> ApiResult<ApiResponse<SessionData>> {
        let mut installation = Map::new();
        if let Some(uuid) = &self.uuid {
            installation.insert("uuid".to_string(), Value::String(uuid.clone()));
        }

        let request = ApiRequest::post("sessions")
            .with_body(json!({ "user": user, "installation": installation }));
        let response: ApiResponse<SessionData> = self.send(request).await?;

        tracing::info!(auth_type = user.login.auth_type().as_str(), "Logged in");
        self.session_token = Some(response.data.session_token.clone());
        Ok(response)
    }

    pub async fn log_out(&mut self) -> ApiResult<ApiResponse<SessionData>> {
        let token = self.session_token.clone().ok_or(ApiError::NoSession)?;

        let request = ApiRequest::delete(format!("sessions/{}", token)).with_body(json!({}));
        let response = self.send(request).await?;

        tracing::info!("Logged out");
        self.session_token = None;
        Ok(response)
    }

    pub async fn user_forgot_password(&self, email: &str) -> ApiResult<ApiResponse<RawData>> {
        let request = ApiRequest::post("user_forgot_password")
            .with_body(json!({ "user": { "email": email } }));
        self.send(request).await
    }

    // ========================================================================
    // Recognition
    // ========================================================================

    /// Recognize a base64 encoded image (PNG unless `mime_type` says otherwise)
    pub async fn recognize_dish_image(
        &self,
        base64: &str,
        mime_type: Option<&str>,
    ) -> ApiResult<ApiResponse<RecognitionData>> {
        self.recognize_dish_image_uri(&image_data_uri(base64, mime_type))
            .await
    }

    pub async fn recognize_dish_image_uri(
        &self,
        uri: &str,
    ) -> ApiResult<ApiResponse<RecognitionData>> {
        let request = ApiRequest::post("images/recognize")
            .with_body(json!({ "image": { "file": uri } }));
        self.send(request).await
    }

    // ========================================================================
    // Dishes and foods
    // ========================================================================

    pub async fn get_dishes(
        &self,
        user_id: Option<i64>,
        query: &DishQuery,
    ) -> ApiResult<ApiResponse<DishesData>> {
        let mut request = ApiRequest::get(format!("users/{}/dishes", user_segment(user_id)));
        if let Some(last_sync) = &query.last_sync {
            request = request.with_query("last_sync_at", last_sync.to_query_value());
        }
        if let Some(sort) = query.sort.as_deref().filter(|s| !s.is_empty()) {
            request = request.with_query("q[sorts]", sort);
        }
        self.send(request).await
    }

    pub async fn get_food(&self, food_id: i64) -> ApiResult<ApiResponse<FoodData>> {
        self.send(ApiRequest::get(format!("foods/{}", food_id))).await
    }

    pub async fn add_dish(
        &self,
        user_id: Option<i64>,
        dish: &PostDish,
    ) -> ApiResult<ApiResponse<DishData>> {
        let request = ApiRequest::post(format!("users/{}/dishes", user_segment(user_id)))
            .with_body(json!({ "dish": dish }));
        self.send(request).await
    }

    /// Delete a dish; the returned dish is flagged as destroyed
    pub async fn remove_dish(
        &self,
        user_id: Option<i64>,
        dish_id: i64,
    ) -> ApiResult<ApiResponse<DishData>> {
        let request = ApiRequest::delete(format!(
            "users/{}/dishes/{}",
            user_segment(user_id),
            dish_id
        ));
        let mut response: ApiResponse<DishData> = self.send(request).await?;
        response.data.dish.destroyed = true;
        Ok(response)
    }

    /// Copy an existing dish, applying the fields of `dish` to the copy
    pub async fn duplicate_dish(
        &self,
        user_id: Option<i64>,
        dish: &PostDish,
    ) -> ApiResult<ApiResponse<DishData>> {
        let dish_id = dish
            .id
            .ok_or_else(|| ApiError::InvalidRequest("dish to duplicate has no id".to_string()))?;

        let request = ApiRequest::post(format!(
            "users/{}/dishes/{}/duplicate",
            user_segment(user_id),
            dish_id
        ))
        .with_body(json!({ "dish": body_without_id(dish)? }));
        self.send(request).await
    }

    pub async fn update_dish(&self, dish: &PatchDish) -> ApiResult<ApiResponse<DishData>> {
        let request = ApiRequest::patch(format!("dishes/{}", dish.id))
            .with_body(json!({ "dish": body_without_id(dish)? }));
        self.send(request).await
    }

    // ========================================================================
    // Subjects
    // ========================================================================

    pub async fn get_subjects(&self, user_id: Option<i64>) -> ApiResult<ApiResponse<SubjectsData>> {
        self.send(ApiRequest::get(format!(
            "users/{}/subjects",
            user_segment(user_id)
        )))
        .await
    }

    /// Attach the user to a study cohort by subject key
    pub async fn add_subject(
        &self,
        subject_key: &str,
        user_id: Option<i64>,
    ) -> ApiResult<ApiResponse<SubjectsData>> {
        let request = ApiRequest::post(format!(
            "users/{}/subject_attachments",
            user_segment(user_id)
        ))
        .with_body(json!({ "subject_attachment": { "key": subject_key } }));
        self.send(request).await
    }

    pub async fn remove_subject(
        &self,
        subject_key: &str,
        user_id: Option<i64>,
    ) -> ApiResult<ApiResponse<SubjectsData>> {
        self.send(ApiRequest::delete(format!(
            "users/{}/subject_attachments/{}",
            user_segment(user_id),
            subject_key
        )))
        .await
    }

    // ========================================================================
    // Nutrients
    // ========================================================================

    pub async fn nutrients(&self) -> ApiResult<ApiResponse<NutrientsData>> {
        self.send(ApiRequest::get("nutrients")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use reqwest::Method;

    use crate::device::{DeviceInfo, StaticDeviceInfo};
    use crate::models::{sample_dish_json, Login};

    /// Records requests and replays queued responses
    #[derive(Default)]
    struct MockTransport {
        requests: Mutex<Vec<(ApiRequest, Option<String>)>>,
        responses: Mutex<VecDeque<ApiResult<Value>>>,
    }

    impl MockTransport {
        fn respond(&self, data: Value) {
            self.responses.lock().unwrap().push_back(Ok(envelope(data)));
        }

        fn fail(&self, error: ApiError) {
            self.responses.lock().unwrap().push_back(Err(error));
        }

        fn last(&self) -> (ApiRequest, Option<String>) {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }

        fn count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(&self, request: ApiRequest, session_token: Option<&str>) -> ApiResult<Value> {
            self.requests
                .lock()
                .unwrap()
                .push((request, session_token.map(str::to_string)));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(envelope(Value::Null)))
        }
    }

    fn envelope(data: Value) -> Value {
        json!({
            "data": data,
            "meta": {"api_version": "1", "env": "staging", "server_time": "2020-01-01T00:00:00Z", "locale": "en"},
            "status": 200
        })
    }

    fn device() -> StaticDeviceInfo {
        StaticDeviceInfo(DeviceInfo {
            app_version: "1.0".to_string(),
            device_vendor: "Acme".to_string(),
            device_name: "test".to_string(),
            os_name: "TestOS".to_string(),
            os_version: "1".to_string(),
        })
    }

    fn client() -> MfrClient<MockTransport> {
        MfrClient::with_transport(MockTransport::default()).with_device_info(device())
    }

    #[tokio::test]
    async fn test_report_installation_caches_device_info() {
        let mut client = client();
        let extra = BTreeMap::from([("study".to_string(), "pilot".to_string())]);
        client.report_installation("uuid-1", extra).await.unwrap();

        let (request, _) = client.transport().last();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path, "installations/uuid-1");
        let body = request.body.unwrap();
        assert_eq!(body["installation"]["os_name"], "TestOS");
        assert_eq!(body["installation"]["study"], "pilot");

        // Second report reuses the first installation info
        client.report_installation("uuid-2", BTreeMap::new()).await.unwrap();
        let (request, _) = client.transport().last();
        assert_eq!(request.body.unwrap()["installation"]["study"], "pilot");
        assert_eq!(client.installation_uuid(), Some("uuid-2"));
    }

    #[tokio::test]
    async fn test_log_in_stores_session_token() {
        let mut client = client();
        client.report_installation("uuid-1", BTreeMap::new()).await.unwrap();
        client.transport().respond(json!({"session_token": "tok"}));

        let response = client.log_in(&User::new(Login::anonymous())).await.unwrap();
        assert_eq!(response.data.session_token, "tok");
        assert_eq!(client.session_token(), Some("tok"));

        let (request, token) = client.transport().last();
        assert_eq!(request.path, "sessions");
        assert_eq!(token, None);
        assert_eq!(
            request.body.unwrap(),
            json!({"user": {"auth_type": "anonymous"}, "installation": {"uuid": "uuid-1"}})
        );

        // Later calls carry the token
        client.transport().respond(json!({"user": {"id": 4}}));
        let user = client.get_user(None).await.unwrap();
        assert_eq!(user.data.user.profile.id, Some(4));
        let (request, token) = client.transport().last();
        assert_eq!(request.path, "users/me");
        assert_eq!(token.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_log_in_failure_keeps_no_session() {
        let mut client = client();
        client
            .transport()
            .fail(ApiError::from_response(401, r#"{"error": {"type": "auth", "code": "invalid", "message": "no"}}"#));

        let result = client
            .log_in(&User::new(Login::email_password("a@b.org", "wrong")))
            .await;
        assert!(matches!(result, Err(ApiError::Service { status: 401, .. })));
        assert!(!client.is_logged_in());
    }

    #[tokio::test]
    async fn test_log_out_without_session() {
        let mut client = client();
        assert!(matches!(client.log_out().await, Err(ApiError::NoSession)));
        assert_eq!(client.transport().count(), 0);
    }

    #[tokio::test]
    async fn test_log_out_clears_session() {
        let mut client = client();
        client.set_session_token(Some("tok".to_string()));
        client.transport().respond(json!({"session_token": "tok"}));

        client.log_out().await.unwrap();
        let (request, token) = client.transport().last();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "sessions/tok");
        assert_eq!(token.as_deref(), Some("tok"));
        assert!(!client.is_logged_in());
    }

    #[tokio::test]
    async fn test_user_paths() {
        let client = client();
        client.get_user(Some(12)).await.ok();
        assert_eq!(client.transport().last().0.path, "users/12");

        let mut partial = PartialUser {
            email: Some("new@example.org".to_string()),
            password: Some("old".to_string()),
            ..Default::default()
        };
        client.update_user_login(&partial).await.unwrap();
        let (request, _) = client.transport().last();
        assert_eq!(request.path, "users/me/update_email_password");
        assert_eq!(
            request.body.unwrap(),
            json!({"user": {"email": "new@example.org", "password": "old"}})
        );

        partial.profile.id = Some(3);
        client.update_user(&partial).await.unwrap();
        assert_eq!(client.transport().last().0.path, "users/3");

        client.delete_user().await.unwrap();
        let (request, _) = client.transport().last();
        assert_eq!((request.method, request.path.as_str()), (Method::DELETE, "users/me"));

        client.create_user(&User::new(Login::anonymous())).await.unwrap();
        assert_eq!(client.transport().last().0.path, "users");

        client.user_forgot_password("a@b.org").await.unwrap();
        let (request, _) = client.transport().last();
        assert_eq!(request.body.unwrap(), json!({"user": {"email": "a@b.org"}}));
    }

    #[tokio::test]
    async fn test_get_dishes_query() {
        let client = client();
        client.transport().respond(json!({"dishes": [sample_dish_json()]}));

        let since = Utc.with_ymd_and_hms(2020, 3, 1, 8, 0, 0).unwrap();
        let response = client
            .get_dishes(None, &DishQuery::since(LastSync::At(since)))
            .await
            .unwrap();
        assert_eq!(response.data.dishes.len(), 1);
        assert_eq!(response.data.dishes[0].dish_foods[0].eaten().normalized_quantity, 100.0);

        let (request, _) = client.transport().last();
        assert_eq!(request.path, "users/me/dishes");
        assert_eq!(
            request.query,
            vec![
                ("last_sync_at".to_string(), "2020-03-01T08:00:00.000Z".to_string()),
                ("q[sorts]".to_string(), "eaten_at desc".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_dishes_without_sort() {
        let client = client();
        client.transport().respond(json!({"dishes": []}));
        let query = DishQuery {
            last_sync: Some(LastSync::Raw("2020-01-01".to_string())),
            sort: None,
        };
        client.get_dishes(Some(5), &query).await.unwrap();
        let (request, _) = client.transport().last();
        assert_eq!(request.path, "users/5/dishes");
        assert_eq!(
            request.query,
            vec![("last_sync_at".to_string(), "2020-01-01".to_string())]
        );
    }

    #[tokio::test]
    async fn test_dish_mutations() {
        let client = client();
        let mut dish = PostDish::new("2020-03-01T12:30:00Z", 60);
        dish.name = Some("Lunch".to_string());

        client.transport().respond(json!({"dish": sample_dish_json()}));
        let added = client.add_dish(None, &dish).await.unwrap();
        assert!(!added.data.dish.destroyed);
        let (request, _) = client.transport().last();
        assert_eq!(request.path, "users/me/dishes");
        assert_eq!(request.body.unwrap()["dish"]["name"], "Lunch");

        // Duplicating needs the source id and keeps it out of the body
        assert!(matches!(
            client.duplicate_dish(None, &dish).await,
            Err(ApiError::InvalidRequest(_))
        ));
        dish.id = Some(7);
        client.transport().respond(json!({"dish": sample_dish_json()}));
        client.duplicate_dish(None, &dish).await.unwrap();
        let (request, _) = client.transport().last();
        assert_eq!(request.path, "users/me/dishes/7/duplicate");
        assert!(request.body.unwrap()["dish"].get("id").is_none());

        let patch = PatchDish {
            id: 7,
            note: Some("less salt".to_string()),
            ..Default::default()
        };
        client.transport().respond(json!({"dish": sample_dish_json()}));
        client.update_dish(&patch).await.unwrap();
        let (request, _) = client.transport().last();
        assert_eq!(request.path, "dishes/7");
        assert_eq!(request.body.unwrap(), json!({"dish": {"note": "less salt"}}));

        client.transport().respond(json!({"dish": sample_dish_json()}));
        let removed = client.remove_dish(Some(3), 7).await.unwrap();
        assert!(removed.data.dish.destroyed);
        assert_eq!(client.transport().last().0.path, "users/3/dishes/7");
    }

    #[tokio::test]
    async fn test_recognize_dish_image() {
        let client = client();
        client.transport().respond(json!({"recognition": {
            "ml_api_version": "1", "image_recognition_id": "r1", "image_url": "u",
            "predictions": [], "status": "MYFOODREPO.IMAGE_PROCESSED"
        }}));
        let response = client.recognize_dish_image("AAAA", None).await.unwrap();
        assert!(response.data.recognition.is_processed());
        let (request, _) = client.transport().last();
        assert_eq!(request.path, "images/recognize");
        assert_eq!(
            request.body.unwrap(),
            json!({"image": {"file": "data:image/png;base64,AAAA"}})
        );
    }

    #[tokio::test]
    async fn test_subjects() {
        let client = client();
        client.transport().respond(json!({"subjects": []}));
        client.add_subject("KEY1", None).await.unwrap();
        let (request, _) = client.transport().last();
        assert_eq!(request.path, "users/me/subject_attachments");
        assert_eq!(
            request.body.unwrap(),
            json!({"subject_attachment": {"key": "KEY1"}})
        );

        client.transport().respond(json!({"subjects": []}));
        client.remove_subject("KEY1", Some(2)).await.unwrap();
        let (request, _) = client.transport().last();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "users/2/subject_attachments/KEY1");

        client.transport().respond(json!({"subjects": []}));
        let subjects = client.get_subjects(None).await.unwrap();
        assert!(subjects.data.subjects.is_empty());
    }

    #[tokio::test]
    async fn test_nutrients_and_food() {
        let client = client();
        client.transport().respond(json!({"nutrients": [{
            "id": 1, "cname": "energy_kcal", "name_translations": {"en": "Energy"},
            "unit": "kcal", "created_at": "", "updated_at": ""
        }]}));
        let nutrients = client.nutrients().await.unwrap();
        assert_eq!(nutrients.data.nutrients[0].cname, "energy_kcal");

        client.transport().respond(json!({"food": sample_dish_json()["dish_foods"][0]["food"]}));
        let food = client.get_food(5).await.unwrap();
        assert_eq!(food.data.food.id, 5);
        assert_eq!(client.transport().last().0.path, "foods/5");
    }

    #[tokio::test]
    async fn test_timeout_is_forwarded() {
        let mut client = client();
        client.set_timeout(Some(Duration::from_secs(4)));
        client.nutrients().await.ok();
        assert_eq!(client.transport().last().0.timeout, Some(Duration::from_secs(4)));
    }

    #[test]
    fn test_user_segment() {
        assert_eq!(user_segment(None), "me");
        assert_eq!(user_segment(Some(9)), "9");
    }
}
