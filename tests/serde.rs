#![cfg(feature = "serde")]

use hydrant::ast::{Statement, Template};
use serde_json::json;

use pretty_assertions::assert_eq;

const TEMPLATE: &str = r#"{
  "program": {
    "type": "Program",
    "body": [
      {
        "type": "ElementNode",
        "tag": "div",
        "attributes": [
          {
            "type": "AttrNode",
            "name": "class",
            "value": [
              { "type": "TextNode", "chars": "card " },
              { "type": "PathExpression", "parts": ["kind"] }
            ]
          }
        ],
        "children": [
          { "type": "TextNode", "chars": "Hello " },
          {
            "type": "MustacheStatement",
            "sexpr": {
              "type": "SubExpression",
              "path": { "type": "PathExpression", "parts": ["user", "name"] }
            }
          },
          { "type": "CommentStatement", "value": " done " }
        ]
      }
    ]
  }
}"#;

#[test]
fn serde_deserialize_template() {
    let template: Template = serde_json::from_str(TEMPLATE).unwrap();
    let body = &template.program.body;
    assert_eq!(body.len(), 1);
    let element = match &body[0] {
        Statement::Element(element) => element,
        node => panic!("unexpected {}", node.kind()),
    };
    assert_eq!(element.tag, "div");
    assert!(element.attributes[0].quoted);
    assert_eq!(element.children[1].kind(), "MustacheStatement");
    match &element.children[1] {
        Statement::Mustache(mustache) => assert!(mustache.escaped),
        node => panic!("unexpected {}", node.kind()),
    }
}

#[test]
fn serde_deserialize_unknown_node_kind() {
    let err = serde_json::from_str::<Template>(
        r#"{ "program": { "body": [ { "type": "PartialStatement", "name": "x" } ] } }"#,
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("unknown variant `PartialStatement`"), "{msg}");
    assert!(msg.contains("line 1"), "{msg}");
}

#[test]
fn serde_serialize_program() {
    let template: Template = serde_json::from_str(TEMPLATE).unwrap();
    let program = hydrant::compile(&template).unwrap();
    let value = serde_json::to_value(&program).unwrap();
    assert_eq!(
        value,
        json!({
            "opcodes": [
                { "op": "program", "args": { "body": null, "inverse": null } },
                { "op": "string", "args": "" },
                { "op": "stringLiteral", "args": "card " },
                { "op": "id", "args": ["kind"] },
                { "op": "stackLiteral", "args": 0 },
                { "op": "element", "args": 0 },
                {
                    "op": "morph",
                    "args": { "id": 0, "path": [0], "start": 1, "end": 2, "escaped": true }
                },
                {
                    "op": "attribute",
                    "args": { "quoted": true, "name": "class", "parts": 2, "element": 0 }
                },
                { "op": "string", "args": "user.name" },
                { "op": "ambiguous", "args": { "morph": 0 } }
            ],
            "children": []
        })
    );
}

#[test]
fn serde_serialize_literals() {
    use hydrant::ast::{Call, Expr, Mustache, Program};

    let call = Call::new("t")
        .param(Expr::number(1.5))
        .pair("on", Expr::boolean(false));
    let template = Template::new(Program::new(vec![Mustache::new(call).into()]));
    let program = hydrant::compile(&template).unwrap();
    let value = serde_json::to_value(program.opcodes()).unwrap();
    assert_eq!(value[3], json!({ "op": "literal", "args": 1.5 }));
    assert_eq!(value[4], json!({ "op": "literal", "args": false }));
    assert_eq!(value[5], json!({ "op": "stackLiteral", "args": "on" }));
    assert_eq!(value[6], json!({ "op": "stackLiteral", "args": 1 }));
}
