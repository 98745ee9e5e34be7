//! Capability payloads returned by `initialize` and `capabilities/list`.

use serde::{Serialize, Serializer};

/// How document changes are synchronised with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDocumentSyncKind {
    /// Documents are not synchronised.
    None,
    /// Full content on every change.
    Full,
    /// Incremental edits.
    Incremental,
}

impl Serialize for TextDocumentSyncKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Self::None => 0,
            Self::Full => 1,
            Self::Incremental => 2,
        })
    }
}

/// Result of `initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitializeResult {
    /// Capabilities the service offers.
    pub capabilities: ServerCapabilities,
}

/// Language-server capabilities. Only document sync is offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCapabilities {
    pub text_document_sync: TextDocumentSyncKind,
    pub definition_provider: bool,
    pub references_provider: bool,
    pub document_formatting_provider: bool,
    pub document_range_formatting_provider: bool,
    pub document_highlight_provider: bool,
    pub hover_provider: bool,
    /// Always `null`: completion is not offered.
    pub completion_provider: Option<()>,
}

impl InitializeResult {
    /// The fixed capability set announced by this service.
    #[must_use]
    pub fn service() -> Self {
        Self {
            capabilities: ServerCapabilities {
                text_document_sync: TextDocumentSyncKind::Incremental,
                definition_provider: false,
                references_provider: false,
                document_formatting_provider: false,
                document_range_formatting_provider: false,
                document_highlight_provider: false,
                hover_provider: false,
                completion_provider: None,
            },
        }
    }
}

/// Kinds of value a connection option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    MultiString,
    Password,
    Number,
    Category,
    Boolean,
}

/// Well-known meanings a client can attach special UI to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialValueType {
    ServerName,
    DatabaseName,
    AuthType,
    UserName,
    Password,
}

/// One allowed value of a category option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValue {
    pub display_name: String,
    pub name: String,
}

impl CategoryValue {
    fn new(display_name: &str, name: &str) -> Self {
        Self {
            display_name: display_name.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// Metadata describing one connection option.
///
/// Absent values serialise as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionOption {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub group_name: Option<String>,
    pub value_type: ValueType,
    pub default_value: Option<String>,
    pub category_values: Option<Vec<CategoryValue>>,
    pub special_value_type: Option<SpecialValueType>,
    pub is_identity: bool,
    pub is_required: bool,
}

impl ConnectionOption {
    fn identity(name: &str, display_name: &str, description: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_owned(),
            display_name: display_name.to_owned(),
            description: description.to_owned(),
            group_name: None,
            value_type,
            default_value: None,
            category_values: None,
            special_value_type: None,
            is_identity: true,
            is_required: false,
        }
    }

    fn special(mut self, special: SpecialValueType) -> Self {
        self.special_value_type = Some(special);
        self
    }

    fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    fn group(mut self, group: &str) -> Self {
        self.group_name = Some(group.to_owned());
        self
    }

    fn categories(mut self, values: Vec<CategoryValue>) -> Self {
        self.category_values = Some(values);
        self
    }
}

/// Options accepted by `connection/connect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionProviderOptions {
    pub options: Vec<ConnectionOption>,
}

/// Provider description returned by `capabilities/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCapabilities {
    pub protocol_version: String,
    pub provider_name: String,
    pub provider_display_name: String,
    pub connection_provider: ConnectionProviderOptions,
}

/// Result of `capabilities/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilitiesResult {
    pub capabilities: ProviderCapabilities,
}

impl CapabilitiesResult {
    /// The PostgreSQL provider description.
    #[must_use]
    pub fn postgres() -> Self {
        Self {
            capabilities: ProviderCapabilities {
                protocol_version: "1.0".to_owned(),
                provider_name: "PGSQL".to_owned(),
                provider_display_name: "PostgreSQL".to_owned(),
                connection_provider: ConnectionProviderOptions {
                    options: postgres_connection_options(),
                },
            },
        }
    }
}

fn postgres_connection_options() -> Vec<ConnectionOption> {
    vec![
        ConnectionOption::identity(
            "connectionString",
            "Connection String",
            "PostgreSQL-format connection string",
            ValueType::String,
        )
        .group("Source"),
        ConnectionOption::identity(
            "server",
            "Server Name",
            "Name of the PostgreSQL instance",
            ValueType::String,
        )
        .special(SpecialValueType::ServerName)
        .required()
        .group("Source"),
        ConnectionOption::identity(
            "database",
            "Database Name",
            "The name of the initial catalog or database in the data source",
            ValueType::String,
        )
        .special(SpecialValueType::DatabaseName)
        .group("Source"),
        ConnectionOption::identity(
            "user",
            "User Name",
            "Indicates the user ID to be used when connecting to the data source",
            ValueType::String,
        )
        .special(SpecialValueType::UserName)
        .required()
        .group("Security"),
        ConnectionOption::identity(
            "password",
            "Password",
            "Indicates the password to be used when connecting to the data source",
            ValueType::Password,
        )
        .special(SpecialValueType::Password)
        .required()
        .group("Security"),
        ConnectionOption::identity(
            "authenticationType",
            "Authentication Type",
            "Specifies the method of authenticating with SQL Server",
            ValueType::Category,
        )
        .special(SpecialValueType::AuthType)
        .required()
        .group("Security")
        .categories(vec![CategoryValue::new("SQL Login", "SqlLogin")]),
    ]
}
