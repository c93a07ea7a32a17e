//! Angular-flavoured TypeScript: model files and `HttpClient` services.

use specforge_core::application::ports::RenderedFile;
use specforge_core::domain::naming::method_identifier;
use specforge_core::domain::{
    ClientField, ClientMethod, ClientModelBody, ClientModelUnit, ClientParameter,
    ClientServiceUnit, HttpMethod, RelativePath, ValidatorSource,
};
use specforge_core::error::ForgeResult;

use super::Source;

const INDENT: &str = "  ";
const CUSTOM_VALIDATORS_MODULE: &str = "../validators/custom-validators";

pub(super) fn model(unit: &ClientModelUnit) -> ForgeResult<RenderedFile> {
    let mut src = Source::new(INDENT);

    match &unit.body {
        ClientModelBody::Interface { imports, fields } => {
            let (angular, custom) = validator_sources(fields);
            for import in imports {
                src.line(0, format!("import {{ {} }} from './{}';", import.name, import.file_stem));
            }
            if angular {
                src.line(0, "import { Validators } from '@angular/forms';");
            }
            if custom {
                src.line(
                    0,
                    format!("import {{ CustomValidators }} from '{CUSTOM_VALIDATORS_MODULE}';"),
                );
            }
            if !imports.is_empty() || angular || custom {
                src.blank();
            }

            model_doc(&mut src, unit);
            src.line(0, format!("export interface {} {{", unit.name));
            for field in fields {
                if let Some(description) = &field.description {
                    src.doc(1, description);
                }
                let optional = if field.optional { "?" } else { "" };
                src.line(1, format!("{}{optional}: {};", property_key(&field.name), field.ts_type));
            }
            src.line(0, "}");

            if angular || custom {
                src.blank()
                    .line(0, format!("export const {}Validators = {{", unit.name));
                for field in fields.iter().filter(|f| !f.validators.is_empty()) {
                    let list: Vec<&str> =
                        field.validators.iter().map(|v| v.expression.as_str()).collect();
                    src.line(1, format!("{}: [{}],", property_key(&field.name), list.join(", ")));
                }
                src.line(0, "};");
            }
        }
        ClientModelBody::Union { values } => {
            model_doc(&mut src, unit);
            let union = if values.is_empty() {
                "never".to_owned()
            } else {
                values
                    .iter()
                    .map(|v| ts_string(v))
                    .collect::<Vec<_>>()
                    .join(" | ")
            };
            src.line(0, format!("export type {} = {union};", unit.name));
        }
        ClientModelBody::Alias { target } => {
            model_doc(&mut src, unit);
            src.line(0, format!("export type {} = {target};", unit.name));
        }
    }

    ts_file(&unit.file_stem, src)
}

pub(super) fn service(unit: &ClientServiceUnit) -> ForgeResult<RenderedFile> {
    let needs_params = unit.methods.iter().any(|m| !m.query_params.is_empty());

    let mut src = Source::new(INDENT);
    src.line(0, "import { Injectable } from '@angular/core';");
    if needs_params {
        src.line(0, "import { HttpClient, HttpParams } from '@angular/common/http';");
    } else {
        src.line(0, "import { HttpClient } from '@angular/common/http';");
    }
    src.line(0, "import { Observable } from 'rxjs';");
    for import in &unit.model_imports {
        src.line(
            0,
            format!("import {{ {} }} from '../models/{}';", import.name, import.file_stem),
        );
    }

    src.blank()
        .line(0, "@Injectable({")
        .line(1, "providedIn: 'root'")
        .line(0, "})")
        .line(0, format!("export class {} {{", unit.class_name))
        .line(1, format!("private readonly baseUrl = {};", ts_string(&unit.base_url)))
        .blank()
        .line(1, "constructor(private http: HttpClient) {}");

    for method in &unit.methods {
        src.blank();
        service_method(&mut src, method);
    }

    src.line(0, "}");
    ts_file(&unit.file_stem, src)
}

fn service_method(src: &mut Source, method: &ClientMethod) {
    // Optional parameters must trail required ones.
    let mut params: Vec<&ClientParameter> = method.path_params.iter().collect();
    params.extend(method.body.iter());
    params.extend(method.query_params.iter());
    params.sort_by_key(|p| p.optional);

    let signature: Vec<String> = params
        .iter()
        .map(|p| {
            let optional = if p.optional { "?" } else { "" };
            format!("{}{optional}: {}", method_identifier(&p.name), p.ts_type)
        })
        .collect();

    let ret = &method.return_type;
    src.line(
        1,
        format!("{}({}): Observable<{ret}> {{", method.name, signature.join(", ")),
    );
    src.line(2, format!("const url = `${{this.baseUrl}}{}`;", url_path(method)));

    let options = if method.query_params.is_empty() {
        ""
    } else {
        src.line(2, "let params = new HttpParams();");
        for param in &method.query_params {
            let ident = method_identifier(&param.name);
            src.line(2, format!("if ({ident} !== undefined && {ident} !== null) {{"))
                .line(
                    3,
                    format!("params = params.set({}, String({ident}));", ts_string(&param.name)),
                )
                .line(2, "}");
        }
        ", { params }"
    };

    let body = method
        .body
        .as_ref()
        .map_or_else(|| "{}".to_owned(), |b| method_identifier(&b.name));

    let call = match method.http_method {
        HttpMethod::Get => format!("this.http.get<{ret}>(url{options})"),
        HttpMethod::Delete => format!("this.http.delete<{ret}>(url{options})"),
        HttpMethod::Post => format!("this.http.post<{ret}>(url, {body}{options})"),
        HttpMethod::Put => format!("this.http.put<{ret}>(url, {body}{options})"),
        HttpMethod::Patch => format!("this.http.patch<{ret}>(url, {body}{options})"),
    };
    src.line(2, format!("return {call};")).line(1, "}");
}

/// `/users/{user-id}` → `/users/${userId}`.
fn url_path(method: &ClientMethod) -> String {
    let mut path = method.path.replace('`', "\\`");
    for param in &method.path_params {
        path = path.replace(
            &format!("{{{}}}", param.name),
            &format!("${{{}}}", method_identifier(&param.name)),
        );
    }
    path
}

fn model_doc(src: &mut Source, unit: &ClientModelUnit) {
    if let Some(description) = &unit.description {
        src.doc(0, description);
    }
}

fn validator_sources(fields: &[ClientField]) -> (bool, bool) {
    let sources = || fields.iter().flat_map(|f| f.validators.iter().map(|v| v.source));
    (
        sources().any(|s| s == ValidatorSource::Angular),
        sources().any(|s| s == ValidatorSource::Custom),
    )
}

fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if valid {
        name.to_owned()
    } else {
        ts_string(name)
    }
}

fn ts_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn ts_file(file_stem: &str, src: Source) -> ForgeResult<RenderedFile> {
    Ok(RenderedFile {
        relative_path: RelativePath::try_new(format!("{file_stem}.ts"))?,
        contents: src.finish(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use specforge_core::domain::{ClientImport, ClientValidator};

    fn param(name: &str, ts_type: &str, optional: bool) -> ClientParameter {
        ClientParameter {
            name: name.into(),
            ts_type: ts_type.into(),
            optional,
        }
    }

    #[test]
    fn interface_with_validators() {
        let unit = ClientModelUnit {
            api_name: "user".into(),
            name: "User".into(),
            file_stem: "user.model".into(),
            description: None,
            body: ClientModelBody::Interface {
                imports: vec![ClientImport {
                    name: "Address".into(),
                    file_stem: "address.model".into(),
                }],
                fields: vec![
                    ClientField {
                        name: "email".into(),
                        ts_type: "string".into(),
                        optional: false,
                        description: Some("Login address".into()),
                        validators: vec![ClientValidator {
                            expression: "Validators.required".into(),
                            source: ValidatorSource::Angular,
                        }],
                    },
                    ClientField {
                        name: "home-address".into(),
                        ts_type: "Address".into(),
                        optional: true,
                        description: None,
                        validators: Vec::new(),
                    },
                ],
            },
        };

        let file = model(&unit).unwrap();
        assert_eq!(file.relative_path.to_string(), "user.model.ts");
        let text = file.contents;
        assert!(text.starts_with("import { Address } from './address.model';\nimport { Validators } from '@angular/forms';\n\n"));
        assert!(text.contains("  /**\n   * Login address\n   */\n  email: string;\n"));
        assert!(text.contains("  'home-address'?: Address;\n"));
        assert!(text.contains("export const UserValidators = {\n  email: [Validators.required],\n};\n"));
        assert!(!text.contains("CustomValidators"));
    }

    #[test]
    fn enum_models_become_unions() {
        let unit = ClientModelUnit {
            api_name: "auth".into(),
            name: "AuthStatus".into(),
            file_stem: "authstatus.model".into(),
            description: None,
            body: ClientModelBody::Union {
                values: vec!["active".into(), "in-review".into()],
            },
        };
        let text = model(&unit).unwrap().contents;
        assert_eq!(text, "export type AuthStatus = 'active' | 'in-review';\n");
    }

    #[test]
    fn service_builds_urls_and_params() {
        let unit = ClientServiceUnit {
            api_name: "user".into(),
            class_name: "UserService".into(),
            file_stem: "user.service".into(),
            base_url: "http://localhost:8080/api".into(),
            model_imports: vec![ClientImport {
                name: "User".into(),
                file_stem: "user.model".into(),
            }],
            methods: vec![
                ClientMethod {
                    name: "getUser".into(),
                    http_method: HttpMethod::Get,
                    path: "/users/{id}".into(),
                    path_params: vec![param("id", "number", false)],
                    query_params: vec![param("expand", "boolean", true)],
                    body: None,
                    return_type: "User".into(),
                },
                ClientMethod {
                    name: "createUser".into(),
                    http_method: HttpMethod::Post,
                    path: "/users".into(),
                    path_params: Vec::new(),
                    query_params: Vec::new(),
                    body: Some(param("user", "User", false)),
                    return_type: "User".into(),
                },
            ],
        };

        let file = service(&unit).unwrap();
        assert_eq!(file.relative_path.to_string(), "user.service.ts");
        let text = file.contents;
        assert!(text.contains("import { HttpClient, HttpParams } from '@angular/common/http';"));
        assert!(text.contains("import { User } from '../models/user.model';"));
        assert!(text.contains("private readonly baseUrl = 'http://localhost:8080/api';"));
        assert!(text.contains("  getUser(id: number, expand?: boolean): Observable<User> {\n"));
        assert!(text.contains("const url = `${this.baseUrl}/users/${id}`;"));
        assert!(text.contains("params = params.set('expand', String(expand));"));
        assert!(text.contains("return this.http.get<User>(url, { params });"));
        assert!(text.contains("return this.http.post<User>(url, user);"));
    }
}
