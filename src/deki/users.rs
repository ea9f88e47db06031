/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::api::{query, with_query};
use crate::deki::errors::DekiError;
use crate::deki::xml::escape;
use crate::deki::{ApiParams, ApiRequest, ApiResponse, Client, Identifier, NewUser, UserStatus, UserUpdate};
use bytes::Bytes;

impl Client {
    fn users_url(user_id: Option<&Identifier>) -> String {
        match user_id {
            Some(user_id) => format!("users/{}", user_id.user_segment()),
            None => "users".to_string(),
        }
    }

    /// Lists users matching `filters`, or a single user when `user_id` is given
    pub async fn users_get(
        &self,
        user_id: Option<&Identifier>,
        filters: &ApiParams<'_>,
    ) -> Result<ApiResponse, DekiError> {
        let path = with_query(&Self::users_url(user_id), &query(filters.iter().copied()));
        self.get(path).await
    }

    /// Creates a user, or updates it when `user.id` is set.
    ///
    /// A password for an existing user is set with a second request.
    pub async fn users_post(&self, user: &NewUser) -> Result<ApiResponse, DekiError> {
        let password = user.password.as_deref().filter(|p| !p.is_empty());

        let mut path = Self::users_url(None);
        if let (None, Some(password)) = (user.id, password) {
            path = with_query(&path, &query([("accountpassword", password)]));
        }

        let id_attr = user.id.map(|id| format!(r#" id="{id}""#)).unwrap_or_default();
        let content = format!(
            "<user{id_attr}>{}<status>{}</status></user>",
            user_fields(&user.username, &user.email, &user.full_name),
            <&str>::from(UserStatus::Active)
        );
        let output = self.send(ApiRequest::post(path).xml(content)).await?;

        if let (Some(id), Some(password)) = (user.id, password) {
            self.users_password_put(&Identifier::Numeric(id), password)
                .await?;
        }
        Ok(output)
    }

    /// Replaces the details of an existing user
    pub async fn users_put(&self, user_id: &Identifier, user: &UserUpdate) -> Result<ApiResponse, DekiError> {
        let status: &str = user.status.into();
        let content = format!(
            "<user>{}<status>{status}</status></user>",
            user_fields(&user.username, &user.email, &user.full_name)
        );
        self.send(ApiRequest::put(Self::users_url(Some(user_id))).xml(content))
            .await
    }

    pub async fn users_password_put(&self, user_id: &Identifier, password: &str) -> Result<Bytes, DekiError> {
        let path = format!("{}/password", Self::users_url(Some(user_id)));
        self.send_bytes(ApiRequest::put(path).text(password.to_string()))
            .await
    }

    pub async fn users_properties_get(
        &self,
        user_id: &Identifier,
        property: Option<&str>,
    ) -> Result<ApiResponse, DekiError> {
        self.properties_get(&Self::users_url(Some(user_id)), property)
            .await
    }

    pub async fn users_properties_post(
        &self,
        user_id: &Identifier,
        property: &str,
        description: &str,
        content: &str,
    ) -> Result<ApiResponse, DekiError> {
        self.properties_post(&Self::users_url(Some(user_id)), property, description, content)
            .await
    }

    /// Link that signs `username` into the site, see [`Creds::authenticate_link`](crate::deki::Creds::authenticate_link)
    pub fn users_authenticate_link(&self, api_key: &str, username: &str, redirect: Option<&str>) -> String {
        self.creds().authenticate_link(api_key, username, redirect)
    }
}

fn user_fields(username: &str, email: &str, full_name: &str) -> String {
    format!(
        "<username>{}</username><email>{}</email><fullname>{}</fullname>",
        escape(username),
        escape(email),
        escape(full_name)
    )
}
