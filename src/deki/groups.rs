/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::errors::DekiError;
use crate::deki::xml::escape;
use crate::deki::{ApiRequest, ApiResponse, Client, Identifier};

impl Client {
    fn groups_url(group_id: Option<&Identifier>) -> String {
        match group_id {
            Some(group_id) => format!("groups/{}", group_id.group_segment()),
            None => "groups".to_string(),
        }
    }

    /// Lists the groups, or a single group when `group_id` is given
    pub async fn groups_get(&self, group_id: Option<&Identifier>) -> Result<ApiResponse, DekiError> {
        self.get(Self::groups_url(group_id)).await
    }

    /// Creates a group, or renames it when `group_id` is set
    pub async fn groups_post(&self, name: &str, group_id: Option<u64>) -> Result<ApiResponse, DekiError> {
        let id_attr = group_id.map(|id| format!(r#" id="{id}""#)).unwrap_or_default();
        let content = format!("<group{id_attr}><name>{}</name></group>", escape(name));
        self.send(ApiRequest::post(Self::groups_url(None)).xml(content))
            .await
    }

    pub async fn groups_users_get(&self, group_id: &Identifier) -> Result<ApiResponse, DekiError> {
        self.get(format!("{}/users", Self::groups_url(Some(group_id))))
            .await
    }

    /// Adds the users with the given numeric ids to the group
    pub async fn groups_users_post(&self, group_id: &Identifier, user_ids: &[u64]) -> Result<ApiResponse, DekiError> {
        let users: String = user_ids
            .iter()
            .map(|id| format!(r#"<user id="{id}"/>"#))
            .collect();
        let path = format!("{}/users", Self::groups_url(Some(group_id)));
        self.send(ApiRequest::post(path).xml(format!("<users>{users}</users>")))
            .await
    }

    /// Removes a user from the group
    pub async fn groups_users_delete(
        &self,
        group_id: &Identifier,
        user_id: &Identifier,
    ) -> Result<ApiResponse, DekiError> {
        let path = format!(
            "{}/users/{}",
            Self::groups_url(Some(group_id)),
            user_id.group_segment()
        );
        self.delete(path).await
    }
}
