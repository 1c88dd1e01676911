use pretty_assertions::assert_eq;
use struct2type_core::{AppError, Converter};

fn convert(go_source: &str) -> String {
    Converter::default()
        .convert_source(go_source)
        .expect("conversion failed")
}

#[test]
fn test_basic_struct_with_json_tags() {
    let go_source = r#"package test

type User struct {
	Name     string                 `json:"name"`
	Age      int                    `json:"age"`
	Email    string                 `json:"email"`
	IsActive bool                   `json:"is_active"`
	Scores   []float64              `json:"scores"`
	Metadata map[string]interface{} `json:"metadata"`
}
"#;
    let expected = "interface User {
  name: string;
  age: number;
  email: string;
  is_active: boolean;
  scores: number[];
  metadata: Record<string, any>;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_struct_without_json_tags() {
    let go_source = r#"package test

type Product struct {
	ID    int
	Title string
	Price float64
}
"#;
    let expected = "interface Product {
  ID: number;
  Title: string;
  Price: number;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_pointer_fields() {
    let go_source = r#"package test

type PointerDemo struct {
	Name *string `json:"name"`
	Age  *int    `json:"age"`
}
"#;
    let expected = "interface PointerDemo {
  name: string;
  age: number;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_nested_structs() {
    let go_source = r#"package test

type Address struct {
	Street string `json:"street"`
	City   string `json:"city"`
}
type Person struct {
	Name    string  `json:"name"`
	Address Address `json:"address"`
}
"#;
    let expected = "interface Address {
  street: string;
  city: string;
}

interface Person {
  name: string;
  address: Address;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_slice_of_structs() {
    let go_source = r#"package test

type Item struct {
	Value int `json:"value"`
}
type Cart struct {
	Items []Item `json:"items"`
}
"#;
    let expected = "interface Item {
  value: number;
}

interface Cart {
  items: Item[];
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_map_fields() {
    let go_source = r#"package test

type MapDemo struct {
	Labels map[string]string `json:"labels"`
	Counts map[int]int       `json:"counts"`
}
"#;
    let expected = "interface MapDemo {
  labels: Record<string, string>;
  counts: Record<number, number>;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_embedded_structs() {
    let go_source = r#"package test

type Base struct {
	ID int `json:"id"`
}
type Derived struct {
	Base
	Name string `json:"name"`
}
"#;
    let expected = "interface Base {
  id: number;
}

interface Derived {
  Base: Base;
  name: string;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_generic_struct_and_embedded_instantiation() {
    let go_source = r#"package test

type Box[T any] struct {
	Value T `json:"value"`
}
type Wrapper struct {
	Box[int]
	Label string `json:"label"`
}
"#;
    let expected = "interface Box {
  value: T;
}

interface Wrapper {
  Box: Box;
  label: string;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_multiple_names_share_tag_alias() {
    let go_source = r#"package test

type Point struct {
	X, Y int `json:"coord"`
	Z    int
}
"#;
    let expected = "interface Point {
  coord: number;
  coord: number;
  Z: number;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_unsupported_types() {
    let go_source = r#"package test

type Weird struct {
	Ch   chan int `json:"ch"`
	Func func()   `json:"func"`
}
"#;
    let expected = "interface Weird {
  ch: any;
  func: any;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_multiple_structs_on_single_lines() {
    let go_source = r#"package test

type A struct { X int `json:"x"` }
type B struct { Y string `json:"y"` }
"#;
    let expected = "interface A {
  x: number;
}

interface B {
  y: string;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_omitempty_and_dash_tags() {
    let go_source = r#"package test

type OmitDemo struct {
	A int `json:"a,omitempty"`
	B int `json:"-"`
}
"#;
    let expected = "interface OmitDemo {
  a: number;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_bytes_and_timestamps_are_strings() {
    let go_source = r#"package test

import "time"

type Blob struct {
	Data      []byte    `json:"data"`
	CreatedAt time.Time `json:"created_at"`
	Checksum  [32]byte  `json:"checksum"`
}
"#;
    let expected = "interface Blob {
  data: string;
  created_at: string;
  checksum: number[];
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_non_struct_declarations_are_ignored() {
    let go_source = r#"package test

type Status int

const (
	Active Status = iota
	Inactive
)

type Store interface {
	Get(id string) (*Record, error)
}

func (s Status) String() string { return "status" }

type Record struct {
	Status Status `json:"status"`
}
"#;
    let expected = "interface Record {
  status: Status;
}";
    assert_eq!(convert(go_source), expected);
}

#[test]
fn test_file_without_structs() {
    assert_eq!(convert("package empty\n\nfunc main() {}\n"), "");
}

#[test]
fn test_parse_error_is_reported() {
    let err = Converter::default()
        .convert_source("package test\n\ntype Broken struct {\n\tName string\n")
        .unwrap_err();
    match err {
        AppError::Parse(e) => {
            assert_eq!(e.line, 3);
            assert!(e.message.contains("unclosed struct body"));
        }
        other => panic!("expected parse error, got {other}"),
    }
}
