//! XML encoding and decoding for method calls and responses
//!
//! Decoding first builds a small element tree from the `quick-xml` event
//! stream and then walks it. Text is never trimmed globally because string
//! values are whitespace-significant; only numeric and boolean scalars are
//! trimmed before parsing.

use std::collections::BTreeMap;

use base64::Engine;
use chrono::NaiveDateTime;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ProtocolError;
use crate::message::{Fault, MethodCall, MethodResponse};
use crate::value::Value;

/// XML declaration written at the top of every document
const XML_DECL: &str = "<?xml version=\"1.0\"?>";

/// Wire format for `dateTime.iso8601` values
const DATETIME_FORMAT: &str = "%Y%m%dT%H:%M:%S";

/// Dashed variant accepted on decode
const DATETIME_FORMAT_DASHED: &str = "%Y-%m-%dT%H:%M:%S";

// ============================================================================
// Encoding
// ============================================================================

/// Encode a method call as an XML-RPC request document
pub fn encode_call(call: &MethodCall) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str("<methodCall><methodName>");
    out.push_str(&quick_xml::escape::escape(call.method_name.as_str()));
    out.push_str("</methodName><params>");
    for param in &call.params {
        out.push_str("<param>");
        write_value(&mut out, param);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>");
    out
}

/// Encode a method response as an XML-RPC response document
pub fn encode_response(response: &MethodResponse) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str("<methodResponse>");
    match response {
        MethodResponse::Success(value) => {
            out.push_str("<params><param>");
            write_value(&mut out, value);
            out.push_str("</param></params>");
        }
        MethodResponse::Fault(fault) => {
            let mut members = BTreeMap::new();
            members.insert("faultCode".to_string(), Value::from(fault.code));
            members.insert(
                "faultString".to_string(),
                Value::String(fault.message.clone()),
            );
            out.push_str("<fault>");
            write_value(&mut out, &Value::Struct(members));
            out.push_str("</fault>");
        }
    }
    out.push_str("</methodResponse>");
    out
}

fn write_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::Int(i) if i32::try_from(*i).is_ok() => {
            out.push_str(&format!("<int>{}</int>", i));
        }
        Value::Int(i) => out.push_str(&format!("<i8>{}</i8>", i)),
        Value::Bool(b) => out.push_str(&format!("<boolean>{}</boolean>", u8::from(*b))),
        Value::String(s) => {
            out.push_str("<string>");
            out.push_str(&quick_xml::escape::escape(s.as_str()));
            out.push_str("</string>");
        }
        Value::Double(d) => out.push_str(&format!("<double>{}</double>", d)),
        Value::DateTime(dt) => out.push_str(&format!(
            "<dateTime.iso8601>{}</dateTime.iso8601>",
            dt.format(DATETIME_FORMAT)
        )),
        Value::Base64(bytes) => out.push_str(&format!(
            "<base64>{}</base64>",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )),
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                write_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Struct(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                out.push_str("<member><name>");
                out.push_str(&quick_xml::escape::escape(name.as_str()));
                out.push_str("</name>");
                write_value(out, member);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
        Value::Nil => out.push_str("<nil/>"),
    }
    out.push_str("</value>");
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode an XML-RPC request document
pub fn decode_call(xml: &str) -> Result<MethodCall, ProtocolError> {
    let root = parse_document(xml)?;
    root.expect_name("methodCall")?;

    let method_name = root.child("methodName")?.text.trim().to_string();

    let params = match root.find("params") {
        Some(params) => decode_params(params)?,
        None => Vec::new(),
    };

    Ok(MethodCall {
        method_name,
        params,
    })
}

/// Decode an XML-RPC response document
pub fn decode_response(xml: &str) -> Result<MethodResponse, ProtocolError> {
    tracing::trace!(bytes = xml.len(), "Decoding method response");
    let root = parse_document(xml)?;
    root.expect_name("methodResponse")?;

    if let Some(fault) = root.find("fault") {
        let value = decode_value(fault.child("value")?)?;
        return Ok(MethodResponse::Fault(decode_fault(value)?));
    }

    let params = root.child("params")?;
    let mut values = decode_params(params)?;
    if values.is_empty() {
        return Err(ProtocolError::MissingElement("param"));
    }
    Ok(MethodResponse::Success(values.swap_remove(0)))
}

fn decode_params(params: &Element) -> Result<Vec<Value>, ProtocolError> {
    params
        .children
        .iter()
        .map(|param| {
            param.expect_name("param")?;
            decode_value(param.child("value")?)
        })
        .collect()
}

fn decode_fault(value: Value) -> Result<Fault, ProtocolError> {
    let mut members = match value {
        Value::Struct(members) => members,
        other => {
            return Err(ProtocolError::InvalidValue {
                kind: "fault",
                text: other.type_name().to_string(),
            })
        }
    };

    let code = match members.remove("faultCode") {
        Some(Value::Int(code)) => i32::try_from(code).map_err(|_| ProtocolError::InvalidValue {
            kind: "faultCode",
            text: code.to_string(),
        })?,
        Some(Value::String(text)) => {
            text.trim()
                .parse::<i32>()
                .map_err(|_| ProtocolError::InvalidValue {
                    kind: "faultCode",
                    text,
                })?
        }
        _ => return Err(ProtocolError::MissingElement("faultCode")),
    };

    let message = match members.remove("faultString") {
        Some(Value::String(message)) => message,
        _ => return Err(ProtocolError::MissingElement("faultString")),
    };

    Ok(Fault { code, message })
}

fn decode_value(element: &Element) -> Result<Value, ProtocolError> {
    element.expect_name("value")?;

    // An untyped <value> holds its text directly and defaults to string
    let Some(typed) = element.children.first() else {
        return Ok(Value::String(element.text.clone()));
    };

    match typed.name.as_str() {
        "int" | "i4" | "i8" => parse_scalar(typed, "int").map(Value::Int),
        "boolean" => match typed.text.trim() {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            other => Err(ProtocolError::InvalidValue {
                kind: "boolean",
                text: other.to_string(),
            }),
        },
        "string" => Ok(Value::String(typed.text.clone())),
        "double" => parse_scalar(typed, "double").map(Value::Double),
        "dateTime.iso8601" => {
            let text = typed.text.trim();
            NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(text, DATETIME_FORMAT_DASHED))
                .map(Value::DateTime)
                .map_err(|_| ProtocolError::InvalidValue {
                    kind: "dateTime.iso8601",
                    text: text.to_string(),
                })
        }
        "base64" => {
            let compact: String = typed
                .text
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;
            Ok(Value::Base64(bytes))
        }
        "array" => {
            let data = typed.child("data")?;
            data.children
                .iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        "struct" => {
            let mut members = BTreeMap::new();
            for member in &typed.children {
                member.expect_name("member")?;
                let name = member.child("name")?.text.clone();
                let value = decode_value(member.child("value")?)?;
                members.insert(name, value);
            }
            Ok(Value::Struct(members))
        }
        "nil" => Ok(Value::Nil),
        other => Err(ProtocolError::UnexpectedElement {
            parent: "value".to_string(),
            found: other.to_string(),
        }),
    }
}

fn parse_scalar<T: std::str::FromStr>(
    element: &Element,
    kind: &'static str,
) -> Result<T, ProtocolError> {
    let text = element.text.trim();
    text.parse().map_err(|_| ProtocolError::InvalidValue {
        kind,
        text: text.to_string(),
    })
}

// ============================================================================
// Element tree
// ============================================================================

/// Minimal DOM node built from the XML event stream
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Default::default()
        }
    }

    fn expect_name(&self, name: &'static str) -> Result<(), ProtocolError> {
        if self.name == name {
            Ok(())
        } else {
            Err(ProtocolError::UnexpectedElement {
                parent: name.to_string(),
                found: self.name.clone(),
            })
        }
    }

    fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn child(&self, name: &'static str) -> Result<&Element, ProtocolError> {
        self.find(name).ok_or(ProtocolError::MissingElement(name))
    }
}

fn parse_document(xml: &str) -> Result<Element, ProtocolError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ProtocolError::Xml(e.to_string()))?;

        match event {
            Event::Start(start) => stack.push(Element::new(start.local_name().as_ref())),
            Event::Empty(empty) => {
                let element = Element::new(empty.local_name().as_ref());
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ProtocolError::Xml("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| ProtocolError::Xml(e.to_string()))?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ProtocolError::Xml("unexpected end of document".to_string()));
    }

    root.ok_or(ProtocolError::Empty)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ProtocolError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(ProtocolError::Xml("multiple root elements".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_call_with_scalars() {
        let call = MethodCall::new(
            "createDeterministicAddresses",
            vec![
                Value::from("cGFzcw=="),
                Value::from(1i32),
                Value::from(false),
            ],
        );

        assert_eq!(
            encode_call(&call),
            "<?xml version=\"1.0\"?><methodCall>\
             <methodName>createDeterministicAddresses</methodName><params>\
             <param><value><string>cGFzcw==</string></value></param>\
             <param><value><int>1</int></value></param>\
             <param><value><boolean>0</boolean></value></param>\
             </params></methodCall>"
        );
    }

    #[test]
    fn test_encode_escapes_markup() {
        let call = MethodCall::new("helloWorld", vec![Value::from("a<b>&c")]);
        let xml = encode_call(&call);
        assert!(xml.contains("<string>a&lt;b&gt;&amp;c</string>"));

        let decoded = decode_call(&xml).unwrap();
        assert_eq!(decoded, call);
    }

    #[test]
    fn test_encode_large_int_uses_i8() {
        let call = MethodCall::new("add", vec![Value::Int(i64::from(i32::MAX) + 1)]);
        assert!(encode_call(&call).contains("<i8>2147483648</i8>"));
    }

    #[test]
    fn test_decode_untyped_value_is_string() {
        let xml = "<?xml version=\"1.0\"?>\n<methodResponse>\n<params>\n<param>\n\
                   <value>BM-2cWzSnwjJ7yRP3nLEWUV5LisTZyREWSzUK</value>\n\
                   </param>\n</params>\n</methodResponse>\n";

        assert_eq!(
            decode_response(xml).unwrap(),
            MethodResponse::Success(Value::from("BM-2cWzSnwjJ7yRP3nLEWUV5LisTZyREWSzUK"))
        );
    }

    #[test]
    fn test_decode_preserves_string_whitespace() {
        let xml = "<methodResponse><params><param><value><string>  spaced  </string>\
                   </value></param></params></methodResponse>";
        assert_eq!(
            decode_response(xml).unwrap(),
            MethodResponse::Success(Value::from("  spaced  "))
        );
    }

    #[test]
    fn test_decode_nested_struct_and_array() {
        let xml = r#"<?xml version="1.0"?>
<methodResponse>
  <params>
    <param>
      <value>
        <struct>
          <member><name>count</name><value><i4>2</i4></value></member>
          <member>
            <name>items</name>
            <value><array><data>
              <value><string>a</string></value>
              <value><boolean>1</boolean></value>
              <value><double>1.5</double></value>
              <value><nil/></value>
            </data></array></value>
          </member>
          <member><name>when</name><value><dateTime.iso8601>19980717T14:08:55</dateTime.iso8601></value></member>
          <member><name>blob</name><value><base64>aGk=</base64></value></member>
        </struct>
      </value>
    </param>
  </params>
</methodResponse>"#;

        let MethodResponse::Success(Value::Struct(members)) = decode_response(xml).unwrap() else {
            panic!("expected struct response");
        };

        assert_eq!(members["count"], Value::Int(2));
        assert_eq!(
            members["items"],
            Value::Array(vec![
                Value::from("a"),
                Value::Bool(true),
                Value::Double(1.5),
                Value::Nil,
            ])
        );
        assert_eq!(
            members["when"],
            Value::DateTime(
                NaiveDateTime::parse_from_str("19980717T14:08:55", DATETIME_FORMAT).unwrap()
            )
        );
        assert_eq!(members["blob"], Value::Base64(b"hi".to_vec()));
    }

    #[test]
    fn test_decode_fault() {
        let xml = r#"<?xml version="1.0"?>
<methodResponse><fault><value><struct>
  <member><name>faultCode</name><value><int>4</int></value></member>
  <member><name>faultString</name><value><string>Too many parameters.</string></value></member>
</struct></value></fault></methodResponse>"#;

        assert_eq!(
            decode_response(xml).unwrap(),
            MethodResponse::Fault(Fault::new(4, "Too many parameters."))
        );
    }

    #[test]
    fn test_response_encode_decode_fault() {
        let response = MethodResponse::Fault(Fault::new(-32601, "method not found"));
        assert_eq!(decode_response(&encode_response(&response)).unwrap(), response);
    }

    #[test]
    fn test_decode_call_without_params() {
        let xml = "<methodCall><methodName> listAddresses </methodName></methodCall>";
        let call = decode_call(xml).unwrap();
        assert_eq!(call.method_name, "listAddresses");
        assert!(call.params.is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_int() {
        let xml = "<methodResponse><params><param><value><int>abc</int></value>\
                   </param></params></methodResponse>";
        assert!(matches!(
            decode_response(xml),
            Err(ProtocolError::InvalidValue { kind: "int", .. })
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let xml = "<methodResponse><params><param><value><float>1</float></value>\
                   </param></params></methodResponse>";
        assert!(matches!(
            decode_response(xml),
            Err(ProtocolError::UnexpectedElement { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_root() {
        let xml = "<html><body>Unauthorized</body></html>";
        assert!(matches!(
            decode_response(xml),
            Err(ProtocolError::UnexpectedElement { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_missing_param() {
        let xml = "<methodResponse><params></params></methodResponse>";
        assert!(matches!(
            decode_response(xml),
            Err(ProtocolError::MissingElement("param"))
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_document() {
        let xml = "<methodResponse><params><param>";
        assert!(decode_response(xml).is_err());
    }

    #[test]
    fn test_decode_empty_document() {
        assert!(matches!(decode_response(""), Err(ProtocolError::Empty)));
    }
}
