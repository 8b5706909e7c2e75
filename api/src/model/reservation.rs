use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{ReservationId, SpaceId, UserId},
    reservation::{
        event::{CreateReservation, UpdateReservation},
        Reservation, ReservationSpace, ReservationState,
    },
};
use serde::{Deserialize, Serialize};

/// Times of day travel as `"HH:MM"` on the wire.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => NaiveTime::parse_from_str(&raw, super::FORMAT)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub fecha: NaiveDate,
    #[garde(skip)]
    #[serde(with = "hhmm")]
    pub hora_inicio: NaiveTime,
    #[garde(skip)]
    #[serde(with = "hhmm")]
    pub hora_fin: NaiveTime,
    #[garde(skip)]
    pub espacio_id: SpaceId,
}

impl From<CreateReservationRequest> for CreateReservation {
    fn from(value: CreateReservationRequest) -> Self {
        let CreateReservationRequest {
            title,
            fecha,
            hora_inicio,
            hora_fin,
            espacio_id,
        } = value;
        CreateReservation::new(espacio_id, title, fecha, hora_inicio, hora_fin)
    }
}

/// Wire name of a lifecycle state, as accepted on updates.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum EstadoName {
    #[serde(rename = "pendiente")]
    Pendiente,
    #[serde(rename = "confirmada")]
    Confirmada,
    #[serde(rename = "rechazada")]
    Rechazada,
    #[serde(rename = "cancelada")]
    Cancelada,
}

impl From<EstadoName> for ReservationState {
    fn from(value: EstadoName) -> Self {
        match value {
            EstadoName::Pendiente => ReservationState::Pending,
            EstadoName::Confirmada => ReservationState::Confirmed,
            EstadoName::Rechazada => ReservationState::Rejected,
            EstadoName::Cancelada => ReservationState::Cancelled,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateReservationRequest {
    #[garde(inner(length(min = 1)))]
    pub titulo: Option<String>,
    #[garde(skip)]
    pub fecha: Option<NaiveDate>,
    #[garde(skip)]
    #[serde(default, deserialize_with = "hhmm::option::deserialize")]
    pub hora_inicio: Option<NaiveTime>,
    #[garde(skip)]
    #[serde(default, deserialize_with = "hhmm::option::deserialize")]
    pub hora_fin: Option<NaiveTime>,
    #[garde(skip)]
    pub espacio_id: Option<SpaceId>,
    #[garde(skip)]
    pub estado: Option<EstadoName>,
    #[garde(skip)]
    pub motivo_rechazo: Option<String>,
}

impl From<UpdateReservationRequest> for UpdateReservation {
    fn from(value: UpdateReservationRequest) -> Self {
        let UpdateReservationRequest {
            titulo,
            fecha,
            hora_inicio,
            hora_fin,
            espacio_id,
            estado,
            motivo_rechazo,
        } = value;
        UpdateReservation {
            title: titulo,
            space_id: espacio_id,
            reserved_date: fecha,
            start_time: hora_inicio,
            end_time: hora_fin,
            state: estado.map(ReservationState::from),
            rejection_reason: motivo_rechazo,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub todas: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CheckAvailabilityQuery {
    pub espacio_id: SpaceId,
    pub fecha: NaiveDate,
    #[serde(with = "hhmm")]
    pub hora_inicio: NaiveTime,
    #[serde(with = "hhmm")]
    pub hora_fin: NaiveTime,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub disponible: bool,
}

#[derive(Serialize)]
pub struct ReservationResponse {
    pub id: ReservationId,
    pub titulo: String,
    pub fecha: NaiveDate,
    #[serde(with = "hhmm")]
    pub hora_inicio: NaiveTime,
    #[serde(with = "hhmm")]
    pub hora_fin: NaiveTime,
    pub estado: String,
    pub espacio: EspacioResponse,
    pub usuario_id: UserId,
    pub usuario: String,
    pub creado_por_admin: bool,
    pub confirmada_por: Option<UserId>,
    pub motivo_rechazo: Option<String>,
    pub creada_en: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            reserved_by,
            user_name,
            space,
            title,
            reserved_date,
            start_time,
            end_time,
            state,
            created_by_admin,
            confirmed_by,
            rejection_reason,
            created_at,
        } = value;
        Self {
            id: reservation_id,
            titulo: title,
            fecha: reserved_date,
            hora_inicio: start_time,
            hora_fin: end_time,
            estado: state.to_string(),
            espacio: space.into(),
            usuario_id: reserved_by,
            usuario: user_name,
            creado_por_admin: created_by_admin,
            confirmada_por: confirmed_by,
            motivo_rechazo: rejection_reason,
            creada_en: created_at,
        }
    }
}

#[derive(Serialize)]
pub struct EspacioResponse {
    pub espacio_id: SpaceId,
    pub nombre: String,
    pub capacidad: i32,
    pub categoria: String,
}

impl From<ReservationSpace> for EspacioResponse {
    fn from(value: ReservationSpace) -> Self {
        let ReservationSpace {
            space_id,
            space_name,
            capacity,
            category,
        } = value;
        Self {
            espacio_id: space_id,
            nombre: space_name,
            capacidad: capacity,
            categoria: category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_wire_names() {
        let raw = r#"{
            "title": "Ensayo de coro",
            "fecha": "2026-09-10",
            "hora_inicio": "09:00",
            "hora_fin": "11:00",
            "espacio_id": "6f9b48f0-0c6f-4a44-9f58-3b8a2fb0f0aa"
        }"#;
        let req: CreateReservationRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.hora_inicio, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(req.hora_fin, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
    }

    #[test]
    fn times_with_seconds_are_rejected() {
        let raw = r#"{
            "title": "Ensayo",
            "fecha": "2026-09-10",
            "hora_inicio": "09:00:00",
            "hora_fin": "11:00",
            "espacio_id": "6f9b48f0-0c6f-4a44-9f58-3b8a2fb0f0aa"
        }"#;
        assert!(serde_json::from_str::<CreateReservationRequest>(raw).is_err());
    }

    #[test]
    fn update_request_maps_estado() {
        let raw = r#"{"estado": "rechazada", "motivo_rechazo": "mantenimiento"}"#;
        let req: UpdateReservationRequest = serde_json::from_str(raw).unwrap();
        let cmd = UpdateReservation::from(req);
        assert_eq!(cmd.state, Some(ReservationState::Rejected));
        assert_eq!(cmd.rejection_reason.as_deref(), Some("mantenimiento"));
        assert!(cmd.title.is_none());
    }

    #[test]
    fn empty_title_fails_validation() {
        let req = CreateReservationRequest {
            title: "".into(),
            fecha: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            hora_inicio: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            hora_fin: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            espacio_id: SpaceId::new(),
        };
        assert!(req.validate(&()).is_err());
    }
}
