use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record field as the lookup service sent it. `None` covers both a missing
/// key and an explicit JSON `null`.
pub type Field = Option<Value>;

/// One credential entry returned by `/censistas`.
///
/// Values are kept as raw JSON so nothing is coerced on the way to the screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub id: Field,
    #[serde(rename = "usuario")]
    pub username: Field,
    pub password: Field,
    #[serde(rename = "codsede")]
    pub site_code: Field,
    #[serde(rename = "brigada")]
    pub brigade: Field,
    #[serde(rename = "ruta")]
    pub route: Field,
    pub dni: Field,
    #[serde(rename = "nomb_ape")]
    pub full_name: Field,
    #[serde(rename = "NOMBSEDE")]
    pub site_name: Field,
    #[serde(rename = "PERMISOS")]
    pub permissions: Field,
    pub id_rol: Field,
    #[serde(rename = "DESC_ROL")]
    pub role_description: Field,
}

/// Query string for a lookup. Empty parameters are left out entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
}

impl SearchQuery {
    /// Trims both filters. Returns `None` when neither has any content left.
    pub fn from_filters(dni: &str, nombre: &str) -> Option<Self> {
        let non_empty = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        let query = Self {
            dni: non_empty(dni),
            nombre: non_empty(nombre),
        };
        if query.dni.is_none() && query.nombre.is_none() {
            None
        } else {
            Some(query)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keeps_wire_names_and_raw_values() {
        let rec: Record = serde_json::from_value(json!({
            "id": 7,
            "usuario": "jperez",
            "password": "s3cret",
            "codsede": "0101",
            "NOMBSEDE": "LIMA CENTRO",
            "brigada": "B-12",
            "ruta": "R3",
            "dni": "74033451",
            "nomb_ape": "JORGE PEREZ",
            "PERMISOS": "LECTURA",
            "id_rol": 0,
            "DESC_ROL": "CENSISTA"
        }))
        .unwrap();

        assert_eq!(rec.id, Some(json!(7)));
        assert_eq!(rec.username, Some(json!("jperez")));
        assert_eq!(rec.site_name, Some(json!("LIMA CENTRO")));
        assert_eq!(rec.id_rol, Some(json!(0)));
        assert_eq!(rec.role_description, Some(json!("CENSISTA")));
    }

    #[test]
    fn missing_and_null_fields_are_absent() {
        let rec: Record = serde_json::from_value(json!({"id": 1, "dni": null})).unwrap();
        assert_eq!(rec.dni, None);
        assert_eq!(rec.password, None);
        assert_eq!(rec.full_name, None);
    }

    #[test]
    fn query_trims_and_omits_empty_filters() {
        let q = SearchQuery::from_filters("  740 ", "   ").unwrap();
        assert_eq!(q.dni.as_deref(), Some("740"));
        assert_eq!(q.nombre, None);

        let q = SearchQuery::from_filters("", " raisa pacora ").unwrap();
        assert_eq!(q.dni, None);
        assert_eq!(q.nombre.as_deref(), Some("raisa pacora"));
    }

    #[test]
    fn query_is_none_without_content() {
        assert_eq!(SearchQuery::from_filters("", ""), None);
        assert_eq!(SearchQuery::from_filters(" \t", "  "), None);
    }
}
