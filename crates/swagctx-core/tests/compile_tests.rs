use swagctx_core::config::CompilerConfig;
use swagctx_core::model::Spec;
use swagctx_core::transform::{self, Compiler, NamingProfile};
use swagctx_core::{CompileError, Context, DiagnosticKind};

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

fn petstore() -> Spec {
    serde_yaml_ng::from_str(PETSTORE).expect("fixture should deserialize")
}

fn str_at<'c>(ctx: &'c Context, key: &str) -> Option<&'c str> {
    ctx.get(key).and_then(Context::as_str)
}

fn seq<'c>(ctx: &'c Context, key: &str) -> &'c [Context] {
    ctx.get(key)
        .and_then(Context::as_sequence)
        .unwrap_or_else(|| panic!("{key} should be a sequence"))
}

fn find<'c>(items: &'c [Context], key: &str, value: &str) -> &'c Context {
    items
        .iter()
        .find(|c| str_at(c, key) == Some(value))
        .unwrap_or_else(|| panic!("no entry with {key} = {value}"))
}

#[test]
fn compile_petstore_metadata() {
    let spec = petstore();
    let out = transform::compile(&spec).unwrap();
    let ctx = &out.context;

    let info = ctx.get("info").unwrap();
    assert_eq!(str_at(info, "title"), Some("Swagger Petstore"));
    assert_eq!(str_at(info, "version"), Some("1.0.0"));
    assert_eq!(str_at(ctx, "host"), Some("petstore.example.com"));
    assert_eq!(str_at(ctx, "basePath"), Some("/v2"));
    assert_eq!(str_at(ctx, "baseURL"), Some("https://petstore.example.com/v2"));
    assert_eq!(seq(ctx, "schemes").len(), 2);
}

#[test]
fn compile_base_url_defaults() {
    let spec: Spec = serde_yaml_ng::from_str("info: {title: Bare, version: '0'}\n").unwrap();
    let out = transform::compile(&spec).unwrap();
    assert_eq!(str_at(&out.context, "baseURL"), Some("http://"));
    assert!(out.context.get("host").is_none());
    assert!(out.context.get("basePath").is_none());
    assert!(out.context.get("info").unwrap().get("description").is_none());
    assert!(out.diagnostics.is_empty());
}

#[test]
fn compile_operations() {
    let spec = petstore();
    let out = transform::compile(&spec).unwrap();
    let operations = seq(&out.context, "operations");
    assert_eq!(operations.len(), 5);

    let ids: Vec<&str> = operations
        .iter()
        .map(|op| str_at(op, "operationId").unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "getPetById",
            "postPet",
            "getPetFindByStatus",
            "deleteStoreOrderByOrderId_orderId",
            "getHealth",
        ]
    );

    let get_pet = find(operations, "operationId", "getPetById");
    assert_eq!(str_at(get_pet, "successType"), Some("Pet"));
    assert_eq!(
        get_pet
            .get("successResponse")
            .and_then(|r| r.get("statusCode"))
            .and_then(Context::as_integer),
        Some(200)
    );
    assert_eq!(
        get_pet
            .get("securityRequirement")
            .and_then(|s| str_at(s, "name")),
        Some("api_key")
    );

    let create = find(operations, "operationId", "postPet");
    assert_eq!(create.get("hasBody").and_then(Context::as_bool), Some(true));
    assert_eq!(
        create.get("bodyParam").and_then(|b| str_at(b, "type")),
        Some("Pet")
    );
    assert!(create.get("successResponse").is_none());

    let find_by_status = find(operations, "operationId", "getPetFindByStatus");
    assert_eq!(str_at(find_by_status, "successType"), Some("array"));
    let schema = find_by_status
        .get("successResponse")
        .and_then(|r| r.get("schema"))
        .unwrap();
    assert_eq!(str_at(schema, "arrayType"), Some("Pet"));
    assert_eq!(seq(find_by_status, "enums").len(), 1);

    let delete = find(operations, "operationId", "deleteStoreOrderByOrderId_orderId");
    assert!(delete.get("successResponse").is_some());
    assert!(delete.get("successType").is_none());
}

#[test]
fn compile_tags_group_by_first_tag() {
    let spec = petstore();
    let out = transform::compile(&spec).unwrap();
    let tags = seq(&out.context, "tags");
    assert_eq!(tags.len(), 2);

    let pet = &tags[0];
    assert_eq!(str_at(pet, "name"), Some("pet"));
    assert_eq!(str_at(pet, "description"), Some("Everything about your pets"));
    assert_eq!(seq(pet, "operations").len(), 3);

    let store = &tags[1];
    assert_eq!(str_at(store, "name"), Some("store"));
    assert!(store.get("description").is_none());
    assert_eq!(seq(store, "operations").len(), 1);

    // The untagged operation is only in the flat list.
    let grouped: usize = tags.iter().map(|t| seq(t, "operations").len()).sum();
    assert_eq!(grouped, 4);
}

#[test]
fn compile_definitions() {
    let spec = petstore();
    let out = transform::compile(&spec).unwrap();
    let definitions = seq(&out.context, "definitions");
    assert_eq!(definitions.len(), 3);

    let pet = find(definitions, "type", "Pet");
    assert_eq!(str_at(pet, "description"), Some("A pet for sale"));
    assert_eq!(
        pet.get("parent").and_then(|p| str_at(p, "type")),
        Some("Animal")
    );

    let all: Vec<&str> = seq(pet, "allProperties")
        .iter()
        .map(|p| str_at(p, "value").unwrap())
        .collect();
    assert_eq!(
        all,
        vec![
            "id",
            "name",
            "tag",
            "category",
            "photo_urls",
            "status",
            "attributes",
            "metadata"
        ]
    );

    let required: Vec<&str> = seq(pet, "requiredProperties")
        .iter()
        .map(|p| str_at(p, "name").unwrap())
        .collect();
    assert_eq!(required, vec!["name", "photoUrls"]);

    let properties = seq(pet, "properties");
    let category = find(properties, "value", "category");
    assert_eq!(str_at(category, "type"), Some("Category"));

    let photos = find(properties, "value", "photo_urls");
    assert_eq!(photos.get("isArray").and_then(Context::as_bool), Some(true));
    assert_eq!(str_at(photos, "arrayType"), Some("string"));

    let attributes = find(properties, "value", "attributes");
    assert_eq!(attributes.get("isDictionary").and_then(Context::as_bool), Some(true));
    assert_eq!(str_at(attributes, "dictionaryType"), Some("string"));

    let metadata = find(properties, "value", "metadata");
    assert_eq!(metadata.get("isDictionary").and_then(Context::as_bool), Some(false));
    assert_eq!(metadata.get("isArray").and_then(Context::as_bool), Some(false));
    assert_eq!(str_at(metadata, "type"), Some("object"));

    let enums = seq(pet, "enums");
    assert_eq!(enums.len(), 1);
    assert_eq!(str_at(&enums[0], "enumName"), Some("PetStatus"));
}

#[test]
fn compile_reports_unresolved_types() {
    let spec = petstore();
    let out = transform::compile(&spec).unwrap();
    assert_eq!(out.diagnostics.len(), 1);
    let diagnostic = &out.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnresolvedType);
    assert_eq!(diagnostic.subject, "Pet.metadata");
}

#[test]
fn compile_reports_each_value_separately() {
    let yaml = r#"
info: {title: Shop, version: "1"}
definitions:
  Pet:
    properties:
      - {name: metadata, type: object}
  Order:
    properties:
      - {name: metadata, type: object}
"#;
    let spec: Spec = serde_yaml_ng::from_str(yaml).unwrap();
    let out = transform::compile(&spec).unwrap();
    let subjects: Vec<&str> = out.diagnostics.iter().map(|d| d.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Pet.metadata", "Order.metadata"]);
}

#[test]
fn compile_exposes_raw_nodes() {
    let spec = petstore();
    let out = transform::compile(&spec).unwrap();

    let raw = out.context.get("raw").unwrap();
    assert_eq!(str_at(raw, "basePath"), Some("/v2"));
    assert_eq!(seq(raw, "operations").len(), 5);

    let get_pet = find(seq(&out.context, "operations"), "operationId", "getPetById");
    let param = &seq(get_pet, "params")[0];
    assert_eq!(param.get("raw").and_then(|r| str_at(r, "in")), Some("path"));
    assert_eq!(get_pet.get("raw").and_then(|r| str_at(r, "method")), Some("get"));

    let pet = find(seq(&out.context, "definitions"), "type", "Pet");
    assert_eq!(
        pet.get("raw").and_then(|r| str_at(r, "parent")),
        Some("#/definitions/Animal")
    );
}

#[test]
fn compile_global_enums_and_security() {
    let spec = petstore();
    let out = transform::compile(&spec).unwrap();

    let enums = seq(&out.context, "enums");
    assert_eq!(enums.len(), 1);
    assert_eq!(str_at(&enums[0], "enumName"), Some("PetStatus"));
    assert_eq!(seq(&enums[0], "enums").len(), 3);

    let security = seq(&out.context, "securityDefinitions");
    assert_eq!(security.len(), 2);
    let oauth = find(security, "name", "petstore_auth");
    assert_eq!(str_at(oauth, "type"), Some("oauth2"));
    assert_eq!(str_at(oauth, "flow"), Some("implicit"));
    assert_eq!(seq(oauth, "scopes").len(), 2);

    let api_key = find(security, "name", "api_key");
    assert_eq!(str_at(api_key, "in"), Some("header"));
    assert!(api_key.get("tokenUrl").is_none());
}

#[test]
fn compile_is_deterministic() {
    let spec = petstore();
    let first = transform::compile(&spec).unwrap();
    let second = transform::compile(&spec).unwrap();
    assert_eq!(first.context, second.context);
    assert_eq!(
        serde_json::to_string(&first.context).unwrap(),
        serde_json::to_string(&second.context).unwrap()
    );
}

#[test]
fn compile_has_no_null_placeholders() {
    let spec = petstore();
    let out = transform::compile(&spec).unwrap();
    let json = serde_json::to_value(&out.context).unwrap();

    fn assert_no_nulls(value: &serde_json::Value) {
        match value {
            serde_json::Value::Null => panic!("context contains a null"),
            serde_json::Value::Array(items) => items.iter().for_each(assert_no_nulls),
            serde_json::Value::Object(map) => map.values().for_each(assert_no_nulls),
            _ => {}
        }
    }
    assert_no_nulls(&json);
}

#[test]
fn compile_runs_in_parallel() {
    let spec = petstore();
    let expected = transform::compile(&spec).unwrap().context;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| transform::compile(&spec).unwrap().context))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn compile_with_swift_profile() {
    let yaml = r##"
info: {title: Reserved, version: "1"}
definitions:
  Type:
    properties:
      - {name: kind, type: string, enum: [a, b]}
  Error: {}
operations:
  - method: get
    path: /types
    responses:
      - statusCode: 200
        schema:
          schema: {$ref: "#/definitions/Type"}
"##;
    let spec: Spec = serde_yaml_ng::from_str(yaml).unwrap();
    let out = transform::compile_with_profile(&spec, NamingProfile::swift()).unwrap();

    let types: Vec<&str> = seq(&out.context, "definitions")
        .iter()
        .map(|d| str_at(d, "type").unwrap())
        .collect();
    assert_eq!(types, vec!["_Type", "_Error"]);

    let op = &seq(&out.context, "operations")[0];
    assert_eq!(str_at(op, "successType"), Some("_Type"));

    let plain = transform::compile(&spec).unwrap();
    let op = &seq(&plain.context, "operations")[0];
    assert_eq!(str_at(op, "successType"), Some("Type"));
}

#[test]
fn compile_from_config() {
    let spec: Spec = serde_yaml_ng::from_str(
        "info: {title: T, version: '1'}\ndefinitions:\n  Response: {}\n",
    )
    .unwrap();
    let config: CompilerConfig =
        serde_yaml_ng::from_str("reserved: [Response]\nescape_prefix: Api\n").unwrap();
    let out = Compiler::from_config(&spec, &config).compile().unwrap();
    let definition = &seq(&out.context, "definitions")[0];
    assert_eq!(str_at(definition, "type"), Some("ApiResponse"));
}

#[test]
fn compile_aborts_on_cyclic_inheritance() {
    let yaml = r##"
info: {title: Cycle, version: "1"}
definitions:
  Fine: {}
  Cat: {parent: Lion}
  Lion: {parent: "#/definitions/Cat"}
"##;
    let spec: Spec = serde_yaml_ng::from_str(yaml).unwrap();
    match transform::compile(&spec) {
        Err(CompileError::CyclicInheritance { schema, chain }) => {
            assert_eq!(schema, "Cat");
            assert_eq!(chain, vec!["Cat", "Lion", "Cat"]);
        }
        other => panic!("expected cyclic inheritance error, got {other:?}"),
    }
}
