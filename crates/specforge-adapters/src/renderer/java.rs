//! Spring-flavoured Java: DTO classes, REST controllers and enums.

use std::collections::BTreeSet;

use specforge_core::application::ports::RenderedFile;
use specforge_core::domain::naming::method_identifier;
use specforge_core::domain::{
    ControllerMethod, ControllerUnit, DtoUnit, EnumUnit, HttpMethod, JavaParameter, RelativePath,
};
use specforge_core::error::ForgeResult;

use super::Source;

const INDENT: &str = "    ";
const SPRING_WEB: &str = "org.springframework.web.bind.annotation";

pub(super) fn dto(unit: &DtoUnit) -> ForgeResult<RenderedFile> {
    let mut src = header(&unit.package, unit.imports.iter());

    if let Some(description) = &unit.description {
        src.doc(0, description);
    }
    src.line(0, format!("public class {} {{", unit.class_name));

    for field in &unit.fields {
        src.blank();
        if let Some(description) = &field.description {
            src.doc(1, description);
        }
        for annotation in &field.annotations {
            src.line(1, annotation.render());
        }
        src.line(1, format!("private {} {};", field.java_type, field.name));
    }

    for field in &unit.fields {
        src.blank()
            .line(1, format!("public {} {}() {{", field.java_type, field.getter))
            .line(2, format!("return {};", field.name))
            .line(1, "}")
            .blank()
            .line(1, format!("public void {}({} {}) {{", field.setter, field.java_type, field.name))
            .line(2, format!("this.{0} = {0};", field.name))
            .line(1, "}");
    }

    src.line(0, "}");
    java_file(&unit.package, &unit.class_name, src)
}

pub(super) fn controller(unit: &ControllerUnit) -> ForgeResult<RenderedFile> {
    let mut imports: BTreeSet<String> = unit.imports.clone();
    imports.insert("org.springframework.http.HttpStatus".into());
    imports.insert("org.springframework.http.ResponseEntity".into());
    imports.insert(format!("{SPRING_WEB}.RestController"));
    for method in &unit.methods {
        imports.insert(format!("{SPRING_WEB}.{}", mapping_annotation(method.http_method)));
        if !method.path_params.is_empty() {
            imports.insert(format!("{SPRING_WEB}.PathVariable"));
        }
        if !method.query_params.is_empty() {
            imports.insert(format!("{SPRING_WEB}.RequestParam"));
        }
        if method.request_body.is_some() {
            imports.insert(format!("{SPRING_WEB}.RequestBody"));
            imports.insert("jakarta.validation.Valid".into());
        }
    }

    let mut src = header(&unit.package, imports.iter());
    src.line(0, "@RestController");
    src.line(0, format!("public class {} {{", unit.class_name));

    for method in &unit.methods {
        src.blank();
        controller_method(&mut src, method);
    }

    src.line(0, "}");
    java_file(&unit.package, &unit.class_name, src)
}

fn controller_method(src: &mut Source, method: &ControllerMethod) {
    let doc: Vec<&str> = [method.summary.as_deref(), method.description.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !doc.is_empty() {
        src.doc(1, &doc.join("\n\n"));
    }

    let mut params: Vec<String> = Vec::new();
    params.extend(method.path_params.iter().map(path_variable));
    params.extend(method.query_params.iter().map(request_param));
    if let Some(body) = &method.request_body {
        let annotation = if body.required {
            "@RequestBody".to_owned()
        } else {
            "@RequestBody(required = false)".to_owned()
        };
        params.push(format!("@Valid {annotation} {} {}", body.java_type, body.name));
    }

    src.line(
        1,
        format!(
            "@{}(\"{}\")",
            mapping_annotation(method.http_method),
            java_string(&method.path)
        ),
    )
    .line(
        1,
        format!(
            "public ResponseEntity<{}> {}({}) {{",
            method.response_type,
            method.name,
            params.join(", ")
        ),
    )
    .line(
        2,
        format!("return ResponseEntity.status({}).build();", status(method.success_status)),
    )
    .line(1, "}");
}

pub(super) fn enumeration(unit: &EnumUnit) -> ForgeResult<RenderedFile> {
    let mut src = header(&unit.package, std::iter::empty());

    if let Some(description) = &unit.description {
        src.doc(0, description);
    }
    src.line(0, format!("public enum {} {{", unit.class_name));

    let last = unit.members.len().saturating_sub(1);
    for (i, member) in unit.members.iter().enumerate() {
        let terminator = if i == last { ";" } else { "," };
        src.line(
            1,
            format!("{}(\"{}\"){terminator}", member.identifier, java_string(&member.value)),
        );
    }
    if unit.members.is_empty() {
        src.line(1, ";");
    }

    src.blank()
        .line(1, "private final String code;")
        .blank()
        .line(1, format!("{}(String code) {{", unit.class_name))
        .line(2, "this.code = code;")
        .line(1, "}")
        .blank()
        .line(1, "public String getCode() {")
        .line(2, "return code;")
        .line(1, "}")
        .line(0, "}");

    java_file(&unit.package, &unit.class_name, src)
}

fn header<'a>(package: &str, imports: impl Iterator<Item = &'a String>) -> Source {
    let mut src = Source::new(INDENT);
    src.line(0, format!("package {package};")).blank();

    let mut any = false;
    for import in imports {
        src.line(0, format!("import {import};"));
        any = true;
    }
    if any {
        src.blank();
    }
    src
}

fn java_file(package: &str, class_name: &str, src: Source) -> ForgeResult<RenderedFile> {
    Ok(RenderedFile {
        relative_path: RelativePath::from_package(package, &format!("{class_name}.java"))?,
        contents: src.finish(),
    })
}

fn path_variable(param: &JavaParameter) -> String {
    let ident = method_identifier(&param.name);
    if ident == param.name {
        format!("@PathVariable {} {ident}", param.java_type)
    } else {
        format!("@PathVariable(\"{}\") {} {ident}", java_string(&param.name), param.java_type)
    }
}

fn request_param(param: &JavaParameter) -> String {
    format!(
        "@RequestParam(name = \"{}\", required = {}) {} {}",
        java_string(&param.name),
        param.required,
        param.java_type,
        method_identifier(&param.name)
    )
}

const fn mapping_annotation(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GetMapping",
        HttpMethod::Post => "PostMapping",
        HttpMethod::Put => "PutMapping",
        HttpMethod::Patch => "PatchMapping",
        HttpMethod::Delete => "DeleteMapping",
    }
}

fn status(code: u16) -> String {
    match code {
        200 => "HttpStatus.OK".to_owned(),
        201 => "HttpStatus.CREATED".to_owned(),
        202 => "HttpStatus.ACCEPTED".to_owned(),
        204 => "HttpStatus.NO_CONTENT".to_owned(),
        other => format!("HttpStatus.valueOf({other})"),
    }
}

fn java_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
