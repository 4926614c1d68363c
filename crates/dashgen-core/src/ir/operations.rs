/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Parse a lowercase path-item key such as `get`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "post" => Some(HttpMethod::Post),
            "delete" => Some(HttpMethod::Delete),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "patch" => Some(HttpMethod::Patch),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }

    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

/// Semantic CRUD kind inferred from an operation's function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::List,
        Bucket::Retrieve,
        Bucket::Create,
        Bucket::Update,
        Bucket::Delete,
    ];

    /// Case-sensitive prefix test, first match wins. `destroy` counts as delete.
    pub fn classify(name: &str) -> Option<Bucket> {
        const PREFIXES: [(&str, Bucket); 6] = [
            ("list", Bucket::List),
            ("retrieve", Bucket::Retrieve),
            ("create", Bucket::Create),
            ("update", Bucket::Update),
            ("delete", Bucket::Delete),
            ("destroy", Bucket::Delete),
        ];
        PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, bucket)| *bucket)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::List => "list",
            Bucket::Retrieve => "retrieve",
            Bucket::Create => "create",
            Bucket::Update => "update",
            Bucket::Delete => "delete",
        }
    }

    /// Whether a successful call changes server state.
    pub fn is_write(&self) -> bool {
        matches!(self, Bucket::Create | Bucket::Update | Bucket::Delete)
    }
}

/// One HTTP verb + path combination, named and classified.
#[derive(Debug, Clone)]
pub struct ClassifiedOperation {
    /// Exported callable name: raw name plus the PascalCase resource suffix.
    pub function_name: String,
    /// Prefix for the operation's record types (`RetrieveFooFoo`).
    pub type_prefix: String,
    /// Name before the resource suffix (operationId, fallback, or alias).
    pub raw_name: String,
    pub operation_id: Option<String>,
    pub method: HttpMethod,
    pub path: String,
    pub url: UrlTemplate,
    pub bucket: Option<Bucket>,
    pub summary: Option<String>,
    pub params: Vec<Field>,
    pub payload: Payload,
}

impl ClassifiedOperation {
    pub fn params_record_name(&self) -> Option<String> {
        (!self.params.is_empty()).then(|| format!("{}Params", self.type_prefix))
    }

    pub fn payload_record_name(&self) -> Option<String> {
        matches!(self.payload, Payload::Record { .. })
            .then(|| format!("{}Payload", self.type_prefix))
    }

    pub fn has_payload(&self) -> bool {
        !matches!(self.payload, Payload::None)
    }

    /// The parameter a resource id binds to: the last path parameter, which
    /// names the item on nested routes like `/shops/{shopId}/items/{itemId}`.
    pub fn last_path_param(&self) -> Option<&Field> {
        self.params
            .iter()
            .rfind(|p| p.location == Some(FieldLocation::Path))
    }

    pub fn query_params(&self) -> impl Iterator<Item = &Field> {
        self.params
            .iter()
            .filter(|p| p.location == Some(FieldLocation::Query))
    }
}

/// A typed member of a parameters record, payload record, or model.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Where a parameter travels; `None` for payload and model properties.
    pub location: Option<FieldLocation>,
    pub read_only: bool,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// Framework-neutral field type from the fixed declared-type lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Boolean,
    String,
    /// List of any.
    Array,
    Any,
}

impl FieldType {
    /// `integer`, `boolean`, `string` and `array` map to themselves; anything
    /// else, including `number`, `object` and a missing type, is `Any`.
    pub fn from_declared(declared: Option<&str>) -> Self {
        match declared {
            Some("integer") => FieldType::Integer,
            Some("boolean") => FieldType::Boolean,
            Some("string") => FieldType::String,
            Some("array") => FieldType::Array,
            _ => FieldType::Any,
        }
    }
}

/// What an operation sends as its request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No request body.
    None,
    /// An object schema whose properties became fields.
    Record {
        /// Component schema name when reached through `$ref`.
        schema: Option<String>,
        fields: Vec<Field>,
    },
    /// A body whose shape could not be derived; typed as any.
    Opaque,
}

/// A URL template split into literal text and `{param}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    pub segments: Vec<UrlSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSegment {
    Literal(String),
    Param(String),
}

impl UrlTemplate {
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = path;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            if open > 0 {
                segments.push(UrlSegment::Literal(rest[..open].to_string()));
            }
            segments.push(UrlSegment::Param(rest[open + 1..open + close].to_string()));
            rest = &rest[open + close + 1..];
        }
        if !rest.is_empty() {
            segments.push(UrlSegment::Literal(rest.to_string()));
        }

        Self { segments }
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            UrlSegment::Param(name) => Some(name.as_str()),
            UrlSegment::Literal(_) => None,
        })
    }
}
