#![allow(dead_code)]

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use uuid::Uuid;

use relational_mapping::{
    Catalog, Column, ColumnType, EntityModel, EntityType, MappingConfig, MappingContext,
    MappingError, PropertyKind, PropertyModel, RelationalEntity, RelationalEnum, TypeShape,
    ValueShape, logging::init_test_tracing,
};

#[derive(RelationalEnum)]
enum Status {
    Open,
    Closed,
}

#[derive(RelationalEntity)]
struct Address {
    street: String,
    #[column("zip")]
    postal_code: String,
}

#[derive(RelationalEntity)]
#[relational(table = "purchase_orders")]
struct PurchaseOrder {
    #[id]
    id: Uuid,
    status: Status,
    #[embedded(prefix = "ship_")]
    shipping: Address,
    #[embedded]
    billing: Option<Address>,
    lines: Vec<OrderLine>,
    tags: HashSet<String>,
    attributes: BTreeMap<String, String>,
    customer: Customer,
}

#[derive(RelationalEntity)]
struct OrderLine {
    #[id]
    line_no: i32,
    sku: String,
}

#[derive(RelationalEntity)]
struct Customer {
    #[id]
    id: Uuid,
    name: String,
}

#[derive(RelationalEntity)]
struct Outer {
    #[embedded]
    inner: Inner,
}

#[derive(RelationalEntity)]
struct Inner {
    #[embedded]
    outer: Box<Outer>,
}

mod billing {
    use relational_mapping::RelationalEntity;

    #[derive(RelationalEntity)]
    #[relational(table = "billing_invoice")]
    pub struct Invoice {
        #[id]
        pub id: i64,
    }
}

mod archive {
    use relational_mapping::RelationalEntity;

    #[derive(RelationalEntity)]
    #[relational(table = "archived_invoice")]
    pub struct Invoice {
        #[id]
        pub id: i64,
    }
}

fn context() -> MappingContext {
    init_test_tracing();
    MappingContext::new()
}

#[test]
fn descriptors_are_cached() {
    let context = context();

    let first = context.required_entity::<PurchaseOrder>().unwrap();
    let second = context.required_entity::<PurchaseOrder>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let by_name = context.entity("PurchaseOrder").unwrap();
    assert!(Arc::ptr_eq(&first, &by_name));
}

#[test]
fn embedded_entities_are_resolved_alongside_their_owner() {
    let context = context();
    context.required_entity::<PurchaseOrder>().unwrap();

    let names: Vec<_> = context.entities().iter().map(|e| e.name()).collect();
    assert_eq!(names, ["Address", "PurchaseOrder"]);
}

#[test]
fn unknown_entity_name_is_not_found() {
    let err = context().entity("Nope").expect_err("nothing resolved yet");
    assert!(matches!(err, MappingError::EntityNotFound(ref name) if name == "Nope"));
}

#[test]
fn shared_type_names_are_ambiguous_by_name() {
    let context = context();
    let billing = context.required_entity::<billing::Invoice>().unwrap();
    let archive = context.required_entity::<archive::Invoice>().unwrap();
    assert!(!Arc::ptr_eq(&billing, &archive));

    let err = context.entity("Invoice").expect_err("two entities are named Invoice");
    assert!(matches!(
        err,
        MappingError::AmbiguousEntityName { ref name, count: 2 } if name == "Invoice"
    ));

    let tables: Vec<_> = context
        .entities()
        .iter()
        .map(|e| e.qualified_table_name().to_string())
        .collect();
    assert_eq!(tables, ["archived_invoice", "billing_invoice"]);
}

#[test]
fn annotated_table_name_wins() {
    let order = context().required_entity::<PurchaseOrder>().unwrap();
    assert_eq!(order.table_name(), "purchase_orders");
    assert_eq!(order.qualified_table_name(), "purchase_orders");
    assert_eq!(order.id_column(), Some("id"));
}

#[test]
fn config_schema_and_suffix_are_applied() {
    let config = MappingConfig {
        schema: Some("sales".to_string()),
        key_column_suffix: "_idx".to_string(),
        ..MappingConfig::default()
    };
    let context = MappingContext::from_config(&config);
    let order = context.required_entity::<PurchaseOrder>().unwrap();

    assert_eq!(order.qualified_table_name(), "sales.purchase_orders");
    assert_eq!(
        order.required_property("lines").unwrap().key_column(),
        Some("purchase_orders_idx")
    );
}

#[test]
fn embedded_columns_are_flattened_with_prefix() {
    let order = context().required_entity::<PurchaseOrder>().unwrap();

    let expected = vec![
        Column {
            name: "id".to_string(),
            column_type: Some(ColumnType::Uuid),
            path: "id".to_string(),
        },
        Column {
            name: "status".to_string(),
            column_type: Some(ColumnType::Text),
            path: "status".to_string(),
        },
        Column {
            name: "ship_street".to_string(),
            column_type: Some(ColumnType::Text),
            path: "shipping.street".to_string(),
        },
        Column {
            name: "ship_zip".to_string(),
            column_type: Some(ColumnType::Text),
            path: "shipping.postal_code".to_string(),
        },
        Column {
            name: "street".to_string(),
            column_type: Some(ColumnType::Text),
            path: "billing.street".to_string(),
        },
        Column {
            name: "zip".to_string(),
            column_type: Some(ColumnType::Text),
            path: "billing.postal_code".to_string(),
        },
    ];
    assert_eq!(order.columns(), expected.as_slice());
}

#[test]
fn entity_collections_use_the_element_id_type() {
    let order = context().required_entity::<PurchaseOrder>().unwrap();
    let lines = order.required_property("lines").unwrap();

    assert_eq!(lines.kind(), PropertyKind::EntityCollection);
    assert!(lines.is_entity());
    assert!(lines.is_ordered());
    assert_eq!(lines.column_type(), Some(&ColumnType::Int32));
    assert_eq!(lines.reverse_column_name(), "purchase_orders");
    assert_eq!(lines.key_column(), Some("purchase_orders_key"));
}

#[test]
fn sets_are_unqualified_collections() {
    let order = context().required_entity::<PurchaseOrder>().unwrap();
    let tags = order.required_property("tags").unwrap();

    assert_eq!(tags.kind(), PropertyKind::SimpleCollection);
    assert!(!tags.is_ordered());
    assert!(!tags.is_qualified());
    assert_eq!(tags.key_column(), None);
    assert_eq!(tags.column_type(), Some(&ColumnType::array_of(ColumnType::Text)));
}

#[test]
fn maps_are_qualified_but_not_collections() {
    let order = context().required_entity::<PurchaseOrder>().unwrap();
    let attributes = order.required_property("attributes").unwrap();

    assert_eq!(attributes.kind(), PropertyKind::Map);
    assert!(attributes.is_map());
    assert!(attributes.is_qualified());
    assert!(!attributes.is_collection_of_simple_type_like());
    assert!(!attributes.is_collection_of_entities_like());
    assert_eq!(attributes.column_type(), Some(&ColumnType::Text));
    assert_eq!(attributes.key_column(), Some("purchase_orders_key"));
}

#[test]
fn references_use_the_target_id_type() {
    let order = context().required_entity::<PurchaseOrder>().unwrap();
    let customer = order.required_property("customer").unwrap();

    assert_eq!(customer.kind(), PropertyKind::Reference);
    assert!(!customer.is_embedded());
    assert_eq!(customer.column_type(), Some(&ColumnType::Uuid));
    assert!(order.columns().iter().all(|column| column.path != "customer"));
}

#[test]
fn embedding_cycles_are_rejected() {
    let err = context()
        .required_entity::<Outer>()
        .expect_err("cycle should fail");
    assert!(matches!(err, MappingError::EmbeddingCycle { entity: "Outer" }));
}

struct TwoIds;

impl ValueShape for TwoIds {
    fn shape() -> TypeShape {
        TypeShape::Entity(EntityType::of::<Self>())
    }
}

impl RelationalEntity for TwoIds {
    fn entity_model() -> EntityModel {
        EntityModel::new("TwoIds")
            .with_property(PropertyModel::of::<i64>("left").id())
            .with_property(PropertyModel::of::<i64>("right").id())
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = context().required_entity::<TwoIds>().expect_err("two ids");
    assert!(matches!(
        err,
        MappingError::DuplicateId {
            entity: "TwoIds",
            first: "left",
            second: "right"
        }
    ));
}

struct RepeatedName;

impl ValueShape for RepeatedName {
    fn shape() -> TypeShape {
        TypeShape::Entity(EntityType::of::<Self>())
    }
}

impl RelationalEntity for RepeatedName {
    fn entity_model() -> EntityModel {
        EntityModel::new("RepeatedName")
            .with_property(PropertyModel::of::<i64>("id").id())
            .with_property(PropertyModel::of::<String>("label"))
            .with_property(PropertyModel::of::<i32>("label"))
    }
}

#[test]
fn duplicate_property_names_are_rejected() {
    let context = context();
    let err = context
        .required_entity::<RepeatedName>()
        .expect_err("label is declared twice");
    assert!(matches!(
        err,
        MappingError::DuplicateProperty {
            entity: "RepeatedName",
            property: "label"
        }
    ));
    assert!(context.entities().is_empty());
}

struct EmbedsScalar;

impl ValueShape for EmbedsScalar {
    fn shape() -> TypeShape {
        TypeShape::Entity(EntityType::of::<Self>())
    }
}

impl RelationalEntity for EmbedsScalar {
    fn entity_model() -> EntityModel {
        EntityModel::new("EmbedsScalar")
            .with_property(PropertyModel::of::<String>("label").with_embedded("x_"))
    }
}

#[test]
fn embedding_a_scalar_is_rejected() {
    let context = context();
    let err = context
        .required_entity::<EmbedsScalar>()
        .expect_err("scalar cannot be embedded");
    assert!(matches!(
        err,
        MappingError::EmbeddedNotEntity {
            entity: "EmbedsScalar",
            property: "label"
        }
    ));
    assert!(context.entities().is_empty());
}

#[test]
fn catalog_lists_resolved_entities() {
    let context = context();
    context.required_entity::<PurchaseOrder>().unwrap();
    context.required_entity::<OrderLine>().unwrap();

    let catalog = Catalog::from_context(&context);
    let names: Vec<_> = catalog.entities.iter().map(|e| e.entity.as_str()).collect();
    assert_eq!(names, ["Address", "OrderLine", "PurchaseOrder"]);

    let order = catalog.entity("PurchaseOrder").unwrap();
    assert_eq!(order.table, "purchase_orders");
    assert_eq!(order.column_count, 6);
    let relations: Vec<_> = order.relations.iter().map(|r| r.property.as_str()).collect();
    assert_eq!(relations, ["lines", "tags", "attributes", "customer"]);

    let json: serde_json::Value = serde_json::from_str(&catalog.to_json().unwrap()).unwrap();
    assert_eq!(json["entities"][2]["columns"][2]["name"], "ship_street");
    assert_eq!(json["entities"][2]["relations"][0]["kind"], "entity_collection");
    assert_eq!(json["entities"][2]["relations"][1]["column_type"], "text[]");
}
