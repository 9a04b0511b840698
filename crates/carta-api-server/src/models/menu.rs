//! Menu payload schema and the canonical persisted document.
//!
//! The upload types mirror the wire format exactly: unknown keys are
//! rejected at every nesting level, names are length-checked on the raw
//! string (no trimming), and the two optional product fields keep distinct
//! absence semantics. A missing `descripcion` becomes the empty string at
//! canonicalization, while a missing `imagen` stays `null`.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Submitted menu body. `barId` arrives as a query parameter, never in the
/// document itself.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MenuUpload {
    #[validate(length(max = 200, message = "como máximo 200 categorías"), nested)]
    #[serde(default)]
    pub categorias: Vec<CategoriaIn>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CategoriaIn {
    #[validate(length(min = 1, max = 120, message = "nombre obligatorio, máximo 120 caracteres"))]
    pub nombre: String,

    #[validate(length(max = 300, message = "como máximo 300 productos"), nested)]
    #[serde(default)]
    pub productos: Vec<ProductoIn>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProductoIn {
    #[validate(length(min = 1, max = 120, message = "nombre obligatorio, máximo 120 caracteres"))]
    pub nombre: String,

    #[validate(range(min = 0.0, max = 9999.0, message = "precio fuera de rango [0, 9999]"))]
    pub precio: f64,

    #[validate(length(max = 500, message = "descripción demasiado larga, máximo 500 caracteres"))]
    pub descripcion: Option<String>,

    #[validate(length(max = 500, message = "imagen demasiado larga, máximo 500 caracteres"))]
    pub imagen: Option<String>,
}

/// Canonical document written to and read from the store:
/// `{"barId": <int>, "categorias": [...]}`, ordering preserved exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartaDocument {
    #[serde(rename = "barId")]
    pub bar_id: i32,
    pub categorias: Vec<Categoria>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
    pub nombre: String,
    pub productos: Vec<Producto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub nombre: String,
    pub precio: f64,
    pub descripcion: String,
    // None serializes as an explicit null, never omitted
    pub imagen: Option<String>,
}

impl CartaDocument {
    /// Attach the bar id and normalize optional fields. Assumes the upload
    /// already passed validation.
    pub fn from_upload(bar_id: i32, upload: MenuUpload) -> Self {
        let categorias = upload
            .categorias
            .into_iter()
            .map(|categoria| Categoria {
                nombre: categoria.nombre,
                productos: categoria
                    .productos
                    .into_iter()
                    .map(|producto| Producto {
                        nombre: producto.nombre,
                        precio: producto.precio,
                        descripcion: producto.descripcion.unwrap_or_default(),
                        imagen: producto.imagen,
                    })
                    .collect(),
            })
            .collect();

        Self { bar_id, categorias }
    }
}

/// One entry of the `detalles` list returned with a 422.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub campo: String,
    pub mensaje: String,
}

/// Flatten nested validation errors into `{campo, mensaje}` entries with
/// full field paths, e.g. `categorias[0].productos[2].precio`.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    walk_errors("", errors, &mut violations);
    violations.sort_by(|a, b| a.campo.cmp(&b.campo));
    violations
}

fn walk_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let campo = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let mensaje = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(FieldViolation {
                        campo: campo.clone(),
                        mensaje,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => walk_errors(&campo, nested, out),
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    walk_errors(&format!("{campo}[{index}]"), nested, out);
                }
            }
        }
    }
}
