//! DOM Element Schema Registry
//!
//! Corresponds to packages/compiler/src/schema/dom_element_schema_registry.ts
//!
//! A compact rendition of the DOM schema: the common HTML elements, their
//! string/boolean/number properties and their events.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::element_schema_registry::{ElementSchemaRegistry, ValidationResult};
use crate::ml_parser::tags::{is_ng_container, is_ng_content};

/// Encoded schema, one line per element group.
///
/// ## Format:
/// Each line: `element_inheritance|properties`
///
/// - Elements separated by `,` share their properties
/// - `^parentElement` inherits the parent's properties and events
/// - Property prefixes: `*` event, `!` boolean, `#` number, `%` object,
///   none for string
static SCHEMA: &[&str] = &[
    "[Element]|textContent,%classList,className,id,innerHTML,outerHTML,#scrollLeft,#scrollTop,slot,*copy,*cut,*paste,*fullscreenchange,*fullscreenerror",
    "[HTMLElement]^[Element]|accessKey,contentEditable,dir,!draggable,!hidden,!inert,innerText,lang,nonce,!spellcheck,%style,#tabIndex,title,!translate,*abort,*blur,*change,*click,*contextmenu,*dblclick,*drag,*dragend,*dragenter,*dragleave,*dragover,*dragstart,*drop,*error,*focus,*input,*invalid,*keydown,*keypress,*keyup,*load,*mousedown,*mouseenter,*mouseleave,*mousemove,*mouseout,*mouseover,*mouseup,*pointerdown,*pointerup,*reset,*resize,*scroll,*select,*submit,*toggle,*transitionend,*wheel",
    "abbr,address,article,aside,b,code,em,footer,header,i,main,nav,section,small,strong,sub,sup,u^[HTMLElement]|",
    "a^[HTMLElement]|download,hash,host,href,hreflang,name,ping,referrerPolicy,rel,%relList,target,text,type",
    "body^[HTMLElement]|*afterprint,*beforeprint,*beforeunload,*hashchange,*message,*offline,*online,*popstate,*storage,*unload",
    "br^[HTMLElement]|clear",
    "button^[HTMLElement]|!disabled,formAction,formMethod,!formNoValidate,formTarget,name,type,value",
    "canvas^[HTMLElement]|#height,#width",
    "div^[HTMLElement]|align",
    "form^[HTMLElement]|acceptCharset,action,autocomplete,enctype,method,name,!noValidate,target",
    "h1,h2,h3,h4,h5,h6^[HTMLElement]|align",
    "iframe^[HTMLElement]|allow,!allowFullscreen,height,loading,name,referrerPolicy,%sandbox,src,srcdoc,width",
    "img^[HTMLElement]|alt,%crossOrigin,decoding,#height,!isMap,loading,referrerPolicy,sizes,src,srcset,useMap,#width",
    "input^[HTMLElement]|accept,alt,autocomplete,!checked,!defaultChecked,defaultValue,!disabled,%files,formAction,#height,!indeterminate,max,#maxLength,min,#minLength,!multiple,name,pattern,placeholder,!readOnly,!required,#size,src,step,type,value,#valueAsNumber,#width",
    "label^[HTMLElement]|htmlFor",
    "li^[HTMLElement]|type,#value",
    "link^[HTMLElement]|as,%crossOrigin,!disabled,href,hreflang,integrity,media,referrerPolicy,rel,%relList,%sizes,type",
    "ol^[HTMLElement]|!reversed,#start,type",
    "option^[HTMLElement]|!defaultSelected,!disabled,label,!selected,text,value",
    "p,pre,span,ul,table,tr,td,th,tbody,thead,tfoot^[HTMLElement]|",
    "script^[HTMLElement]|!async,charset,!defer,integrity,src,text,type",
    "select^[HTMLElement]|autocomplete,!disabled,#length,!multiple,name,!required,#selectedIndex,#size,value",
    "style^[HTMLElement]|!disabled,media,type",
    "template^[HTMLElement]|",
    "textarea^[HTMLElement]|autocomplete,#cols,defaultValue,!disabled,#maxLength,#minLength,name,placeholder,!readOnly,!required,#rows,value,wrap",
    "title^[HTMLElement]|text",
    "video^[HTMLElement]|!autoplay,!controls,#currentTime,!loop,!muted,poster,src,#volume,#height,#width",
    "unknown^[HTMLElement]|",
    ":svg:^[HTMLElement]|%style,#tabIndex",
    ":svg:svg^:svg:|#currentScale",
    ":svg:g,:svg:path,:svg:circle,:svg:rect,:svg:line,:svg:text,:svg:use^:svg:|",
    ":math:^[HTMLElement]|%style,#tabIndex",
];

/// Map from attribute names to property names
pub static ATTR_TO_PROP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("class", "className"),
        ("for", "htmlFor"),
        ("formaction", "formAction"),
        ("innerHtml", "innerHTML"),
        ("readonly", "readOnly"),
        ("tabindex", "tabIndex"),
        ("aria-label", "ariaLabel"),
        ("aria-hidden", "ariaHidden"),
        ("aria-disabled", "ariaDisabled"),
        ("aria-expanded", "ariaExpanded"),
    ])
});

#[derive(Debug, Clone, Default)]
struct ElementSchema {
    properties: HashSet<String>,
    events: HashSet<String>,
}

/// Process-wide decoded schema, built once.
static DECODED_SCHEMA: Lazy<HashMap<String, ElementSchema>> = Lazy::new(decode_schema);

fn decode_schema() -> HashMap<String, ElementSchema> {
    let mut schema: HashMap<String, ElementSchema> = HashMap::new();

    for encoded_type in SCHEMA {
        let Some((str_type, str_properties)) = encoded_type.split_once('|') else {
            continue;
        };
        let (type_names, super_name) = match str_type.split_once('^') {
            Some((names, parent)) => (names, Some(parent)),
            None => (str_type, None),
        };

        let mut element = super_name
            .and_then(|parent| schema.get(&parent.to_lowercase()))
            .cloned()
            .unwrap_or_default();

        for property in str_properties.split(',').filter(|p| !p.is_empty()) {
            match property.as_bytes()[0] {
                b'*' => element.events.insert(property[1..].to_string()),
                // The value kind only matters to sanitization.
                b'!' | b'#' | b'%' => element.properties.insert(property[1..].to_string()),
                _ => element.properties.insert(property.to_string()),
            };
        }

        for tag in type_names.split(',') {
            schema.insert(tag.to_lowercase(), element.clone());
        }
    }

    schema
}

fn is_custom_element(tag_name: &str) -> bool {
    tag_name.contains('-') && !is_ng_container(tag_name) && !is_ng_content(tag_name)
}

/// DOM Element Schema Registry implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct DomElementSchemaRegistry;

impl DomElementSchemaRegistry {
    pub fn new() -> Self {
        DomElementSchemaRegistry
    }

    fn lookup(&self, tag_name: &str) -> Option<&'static ElementSchema> {
        DECODED_SCHEMA
            .get(&tag_name.to_lowercase())
            .or_else(|| DECODED_SCHEMA.get("unknown"))
    }
}

impl ElementSchemaRegistry for DomElementSchemaRegistry {
    fn has_property(&self, tag_name: &str, prop_name: &str) -> bool {
        // Properties of custom elements are only known once they are instantiated.
        if is_custom_element(tag_name) {
            return true;
        }
        self.lookup(tag_name)
            .map(|schema| schema.properties.contains(prop_name))
            .unwrap_or(false)
    }

    fn has_element(&self, tag_name: &str) -> bool {
        if tag_name.contains('-') {
            return true;
        }
        DECODED_SCHEMA.contains_key(&tag_name.to_lowercase())
    }

    fn get_mapped_prop_name(&self, attr_name: &str) -> Option<String> {
        ATTR_TO_PROP.get(attr_name).map(|prop| prop.to_string())
    }

    fn has_event(&self, tag_name: &str, event_name: &str) -> bool {
        if is_custom_element(tag_name) {
            return true;
        }
        self.lookup(tag_name)
            .map(|schema| schema.events.contains(event_name))
            .unwrap_or(false)
    }

    fn validate_property(&self, name: &str) -> ValidationResult {
        if name.to_lowercase().starts_with("on") {
            let event = name.get(2..).unwrap_or("");
            ValidationResult::error(format!(
                "Binding to event property '{}' is disallowed for security reasons, \
                please use ({})=...\n\
                If '{}' is a directive input, make sure the directive is imported by the current module.",
                name, event, name
            ))
        } else {
            ValidationResult::ok()
        }
    }
}
