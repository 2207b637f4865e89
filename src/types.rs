use serde::{Deserialize, Serialize};

/// Fields accepted when creating an account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AccountCreateAttributes>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organisation_id: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

/// Account attributes settable at creation time.
///
/// Server-managed fields such as `status` are absent here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_matching_opt_out: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_number: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_currency: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iban: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joint_account: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secondary_identification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switched: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub processing_service: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_defined_information: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub validation_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_mask: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub acceptance_qualifier: String,
}

/// Account as returned by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AccountAttributes>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organisation_id: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Optimistic-locking version, required by delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_matching_opt_out: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_number: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_currency: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_account: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secondary_identification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switched: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub processing_service: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_defined_information: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub validation_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_mask: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub acceptance_qualifier: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{AccountCreateAttributes, AccountCreateParams, AccountData};

    #[test]
    fn unset_create_fields_are_omitted() {
        let params = AccountCreateParams {
            id: "ad27e265-9605-4b4b-a0e5-3003ea9cc4dc".to_owned(),
            kind: "accounts".to_owned(),
            attributes: Some(AccountCreateAttributes {
                country: Some("GB".to_owned()),
                name: vec!["Samantha Holder".to_owned()],
                ..AccountCreateAttributes::default()
            }),
            ..AccountCreateParams::default()
        };

        let encoded = serde_json::to_value(&params).expect("params must serialize");
        assert_eq!(
            encoded,
            json!({
                "id": "ad27e265-9605-4b4b-a0e5-3003ea9cc4dc",
                "type": "accounts",
                "attributes": {
                    "country": "GB",
                    "name": ["Samantha Holder"]
                }
            })
        );
    }

    #[test]
    fn account_data_tolerates_sparse_payloads() {
        let data: AccountData = serde_json::from_value(json!({
            "id": "7eb322ba-57f6-465c-b600-79f26ac7fdc3",
            "version": 0,
            "attributes": { "status": "confirmed", "bank_id": "400300" }
        }))
        .expect("sparse account must decode");

        assert_eq!(data.id, "7eb322ba-57f6-465c-b600-79f26ac7fdc3");
        assert_eq!(data.version, Some(0));
        let attributes = data.attributes.expect("attributes present");
        assert_eq!(attributes.status.as_deref(), Some("confirmed"));
        assert_eq!(attributes.bank_id, "400300");
        assert!(attributes.name.is_empty());
    }
}
