#![allow(dead_code)]

use goldentest_core::{Golden, GoldenMode};
use prost_reflect::DescriptorPool;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tempfile::TempDir;

// ---------- serde fixtures ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bar {
    pub bla: String,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Foo {
    pub name: String,
    pub values: Vec<i32>,
    pub barbi: Bar,
}

pub fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn foo(name: &str, bla: &str) -> Foo {
    Foo {
        name: name.to_string(),
        values: vec![1, 2, 3],
        barbi: Bar {
            bla: bla.to_string(),
            env: env(&[("ACCOUNT", "1234"), ("ID", "4321"), ("OTHER", "STUFF")]),
        },
    }
}

/// Checked-in fixtures live next to the tests.
pub fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

pub fn scratch() -> TempDir {
    TempDir::new().expect("Failed to create temp golden directory")
}

/// JSON handle in a scratch directory, pinned to compare mode so a
/// `GOLDEN_UPDATE` in the environment cannot change test behaviour.
pub fn foo_golden(dir: &TempDir, file: &str) -> Golden<Foo> {
    Golden::new(dir.path().join(file)).with_mode(GoldenMode::Compare)
}

// ---------- schema-message fixtures ----------

fn field(name: &str, number: i32, label: Label, ty: Type, type_name: Option<&str>) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        type_name: type_name.map(str::to_string),
        ..Default::default()
    }
}

pub static DESCRIPTOR_POOL: LazyLock<DescriptorPool> = LazyLock::new(|| {
    let file = FileDescriptorProto {
        name: Some("trace.proto".to_string()),
        package: Some("trace".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![
            DescriptorProto {
                name: Some("Attributes".to_string()),
                field: vec![
                    field("host", 1, Label::Optional, Type::String, None),
                    field("count", 2, Label::Optional, Type::Int64, None),
                ],
                ..Default::default()
            },
            DescriptorProto {
                name: Some("Span".to_string()),
                field: vec![
                    field("name", 1, Label::Optional, Type::String, None),
                    field("span_id", 2, Label::Optional, Type::String, None),
                    field("start_unix_nanos", 3, Label::Optional, Type::Int64, None),
                    field(
                        "attributes",
                        4,
                        Label::Optional,
                        Type::Message,
                        Some(".trace.Attributes"),
                    ),
                    field("tags", 5, Label::Repeated, Type::String, None),
                ],
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    DescriptorPool::from_file_descriptor_set(FileDescriptorSet { file: vec![file] })
        .expect("trace descriptors are valid")
});

#[derive(Clone, PartialEq, prost::Message, prost_reflect::ReflectMessage)]
#[prost_reflect(descriptor_pool = "DESCRIPTOR_POOL", message_name = "trace.Attributes")]
pub struct Attributes {
    #[prost(string, tag = "1")]
    pub host: String,
    #[prost(int64, tag = "2")]
    pub count: i64,
}

#[derive(Clone, PartialEq, prost::Message, prost_reflect::ReflectMessage)]
#[prost_reflect(descriptor_pool = "DESCRIPTOR_POOL", message_name = "trace.Span")]
pub struct Span {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub span_id: String,
    #[prost(int64, tag = "3")]
    pub start_unix_nanos: i64,
    #[prost(message, optional, tag = "4")]
    pub attributes: Option<Attributes>,
    #[prost(string, repeated, tag = "5")]
    pub tags: Vec<String>,
}

pub fn span(name: &str, span_id: &str) -> Span {
    Span {
        name: name.to_string(),
        span_id: span_id.to_string(),
        ..Default::default()
    }
}
