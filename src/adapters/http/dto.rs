//! Wire types for the school backend. Field names follow the API exactly.
//!
//! Loosely typed values (`durum`, `OgrenciNumara`) are decoded here into domain
//! types; nothing nullable or stringly typed crosses into the core.

use crate::domain::{AttendanceStatus, DomainError, LessonSession, ObjectiveNode, Student};
use crate::ports::RosterRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Date format used in every request.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `POST /teacher/attendance`
#[derive(Debug, Serialize)]
pub struct RosterRequest<'a> {
    #[serde(rename = "Sinif")]
    pub class_id: &'a str,
    #[serde(rename = "Tarih")]
    pub date: String,
    #[serde(rename = "DersSaati")]
    pub period_id: &'a str,
    #[serde(rename = "ProgramID")]
    pub program_id: &'a str,
}

impl<'a> RosterRequest<'a> {
    pub fn new(session: &'a LessonSession) -> Self {
        Self {
            class_id: &session.class_id,
            date: session.date.format(DATE_FORMAT).to_string(),
            period_id: &session.period_id,
            program_id: &session.program_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RosterRow {
    #[serde(rename = "OgrenciId")]
    pub student_id: i64,
    #[serde(rename = "OgrenciNumara", default)]
    pub number: Value,
    #[serde(rename = "AdSoyad", default)]
    pub full_name: String,
    #[serde(default)]
    pub durum: Value,
}

impl RosterRow {
    pub fn into_record(self) -> Result<RosterRecord, DomainError> {
        let status = decode_durum(&self.durum).map_err(|_| {
            DomainError::Decode(format!(
                "student {} has invalid durum value {}",
                self.student_id, self.durum
            ))
        })?;
        Ok(RosterRecord {
            student: Student {
                id: self.student_id,
                number: scalar_to_string(&self.number),
                full_name: self.full_name.trim().to_string(),
            },
            status,
        })
    }
}

/// Decode a `durum` value. Null, missing or blank means "no record" (`None`).
/// Accepts integers and numeric strings; anything outside 0/1/2 is rejected.
pub fn decode_durum(value: &Value) -> Result<Option<AttendanceStatus>, DomainError> {
    let code = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i64(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    code.and_then(AttendanceStatus::from_code)
        .map(Some)
        .ok_or_else(|| DomainError::Decode(format!("invalid durum value {}", value)))
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// `POST /teacher/attendanceadd`
#[derive(Debug, Serialize)]
pub struct AttendanceAddRequest<'a> {
    pub tarih: String,
    #[serde(rename = "OgrenciID")]
    pub student_id: i64,
    #[serde(rename = "ProgramID")]
    pub program_id: &'a str,
    pub durum: u8,
}

impl<'a> AttendanceAddRequest<'a> {
    pub fn new(session: &'a LessonSession, student_id: i64, status: AttendanceStatus) -> Self {
        Self {
            tarih: session.date.format(DATE_FORMAT).to_string(),
            student_id,
            program_id: &session.program_id,
            durum: status.code(),
        }
    }
}

/// `POST /schedule/gain/new/get`
#[derive(Debug, Serialize)]
pub struct GainCatalogRequest<'a> {
    #[serde(rename = "Ders")]
    pub subject: &'a str,
    #[serde(rename = "Sinif")]
    pub class_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GainNode {
    pub id: i64,
    pub baslik: String,
    #[serde(default)]
    pub altbaslik: Option<Vec<String>>,
}

impl From<GainNode> for ObjectiveNode {
    fn from(node: GainNode) -> Self {
        ObjectiveNode {
            id: node.id,
            title: node.baslik,
            subtopics: node.altbaslik.unwrap_or_default(),
        }
    }
}

/// `POST /schedule/gainadd`
#[derive(Debug, Serialize)]
pub struct GainAddRequest<'a> {
    #[serde(rename = "Sinif")]
    pub class_id: &'a str,
    pub kazanim: &'a str,
    #[serde(rename = "ProgramID")]
    pub program_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::session;
    use serde_json::json;

    #[test]
    fn test_decode_durum_variants() {
        assert_eq!(decode_durum(&Value::Null).unwrap(), None);
        assert_eq!(decode_durum(&json!(0)).unwrap(), Some(AttendanceStatus::Absent));
        assert_eq!(decode_durum(&json!(1)).unwrap(), Some(AttendanceStatus::Present));
        assert_eq!(decode_durum(&json!("2")).unwrap(), Some(AttendanceStatus::Late));
        assert_eq!(decode_durum(&json!("")).unwrap(), None);
        assert!(decode_durum(&json!(7)).is_err());
        assert!(decode_durum(&json!("geç")).is_err());
        assert!(decode_durum(&json!(true)).is_err());
    }

    #[test]
    fn test_roster_rows_decode() {
        let body = json!([
            {"OgrenciId": 1, "OgrenciNumara": 101, "AdSoyad": "Ayşe Yılmaz", "durum": null},
            {"OgrenciId": 2, "OgrenciNumara": "0102", "AdSoyad": "Mehmet Demir", "durum": 0},
            {"OgrenciId": 3, "OgrenciNumara": "103", "AdSoyad": "Zeynep Kaya"}
        ]);
        let rows: Vec<RosterRow> = serde_json::from_value(body).unwrap();
        let records: Vec<RosterRecord> = rows
            .into_iter()
            .map(RosterRow::into_record)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records[0].student.number, "101");
        assert_eq!(records[0].status, None);
        assert_eq!(records[1].student.number, "0102");
        assert_eq!(records[1].status, Some(AttendanceStatus::Absent));
        assert_eq!(records[2].status, None);
    }

    #[test]
    fn test_roster_request_shape() {
        let s = session();
        let body = serde_json::to_value(RosterRequest::new(&s)).unwrap();
        assert_eq!(
            body,
            json!({"Sinif": "5-A", "Tarih": "2024-03-11", "DersSaati": "3", "ProgramID": "991"})
        );
    }

    #[test]
    fn test_attendance_add_sends_integer_durum() {
        let s = session();
        let body =
            serde_json::to_value(AttendanceAddRequest::new(&s, 2, AttendanceStatus::Late)).unwrap();
        assert_eq!(
            body,
            json!({"tarih": "2024-03-11", "OgrenciID": 2, "ProgramID": "991", "durum": 2})
        );
    }

    #[test]
    fn test_gain_catalog_request_shape() {
        let body = serde_json::to_value(GainCatalogRequest {
            subject: "Matematik",
            class_id: "5-A",
        })
        .unwrap();
        assert_eq!(body, json!({"Ders": "Matematik", "Sinif": "5-A"}));
    }

    #[test]
    fn test_gain_add_request_shape() {
        let s = session();
        let body = serde_json::to_value(GainAddRequest {
            class_id: &s.class_id,
            kazanim: "Toplama, Çıkarma",
            program_id: &s.program_id,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"Sinif": "5-A", "kazanim": "Toplama, Çıkarma", "ProgramID": "991"})
        );
    }

    #[test]
    fn test_gain_node_missing_altbaslik() {
        let body = json!([
            {"id": 5, "baslik": "Sayılar", "altbaslik": ["Toplama", "Çıkarma"]},
            {"id": 7, "baslik": "Geometrik Cisimler", "altbaslik": null},
            {"id": 8, "baslik": "Veri"}
        ]);
        let nodes: Vec<ObjectiveNode> = serde_json::from_value::<Vec<GainNode>>(body)
            .unwrap()
            .into_iter()
            .map(ObjectiveNode::from)
            .collect();
        assert_eq!(nodes[0].subtopics.len(), 2);
        assert!(nodes[1].is_leaf());
        assert!(nodes[2].is_leaf());
    }
}
