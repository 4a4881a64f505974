use crate::{
    model::event::{VenueDto, VenuePayloadDto},
    server::{
        error::AppError,
        util::{
            sanitize::{clean, clean_opt},
            validate::Validator,
        },
    },
};

const PHONE_DIGITS_MSG: &str = "Phone should only contains number";
const PHONE_LENGTH_MSG: &str = "The length of phone should not exceed 11 characters";

#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Venue {
    pub fn from_entity(entity: entity::venue::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            address1: entity.address1,
            address2: entity.address2,
            address3: entity.address3,
            city: entity.city,
            country: entity.country,
            phone: entity.phone,
            lat: entity.lat,
            lon: entity.lon,
        }
    }

    pub fn into_dto(self) -> VenueDto {
        VenueDto {
            id: self.id,
            name: self.name,
            address1: self.address1,
            address2: self.address2,
            address3: self.address3,
            city: self.city,
            country: self.country,
            phone: self.phone,
        }
    }
}

/// Sanitized venue fields.
#[derive(Debug, Clone, Default)]
pub struct CreateVenueParam {
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

impl CreateVenueParam {
    /// Validates a venue body and escapes its text fields.
    pub fn from_dto(dto: VenuePayloadDto) -> Result<Self, AppError> {
        let mut v = Validator::new();
        v.field("name", Some(dto.name.as_str()))
            .not_empty("Name is required.")
            .max_length(25, "The length of name should not exceed 25 characters.");
        v.field("address1", Some(dto.address1.as_str()))
            .not_empty("address1 is required.")
            .max_length(100, "The length of name should not exceed 100 characters.");
        for (param, value) in [("address2", &dto.address2), ("address3", &dto.address3)] {
            v.field(param, value.as_deref())
                .optional()
                .max_length(100, "The length of name should not exceed 100 characters.");
        }
        for (param, value) in [("city", &dto.city), ("country", &dto.country)] {
            v.field(param, value.as_deref())
                .optional()
                .max_length(50, "The length of name should not exceed 50 characters.");
        }
        v.field("phone", dto.phone.as_deref())
            .optional()
            .numeric(PHONE_DIGITS_MSG)
            .length(8, 11, PHONE_LENGTH_MSG);
        v.finish()?;

        Ok(Self {
            name: clean(&dto.name),
            address1: clean(&dto.address1),
            address2: clean_opt(dto.address2.as_deref()),
            address3: clean_opt(dto.address3.as_deref()),
            city: clean_opt(dto.city.as_deref()),
            country: clean_opt(dto.country.as_deref()),
            phone: dto.phone.map(|phone| phone.trim().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_requires_name_and_address() {
        let result = CreateVenueParam::from_dto(VenuePayloadDto {
            phone: Some("12ab".to_string()),
            ..Default::default()
        });

        let Err(AppError::Validation(errors)) = result else {
            panic!("expected validation errors");
        };
        let msgs: Vec<&str> = errors.iter().map(|e| e.msg.as_str()).collect();

        assert_eq!(
            msgs,
            vec!["Name is required.", "address1 is required.", PHONE_DIGITS_MSG]
        );
    }

    #[test]
    fn venue_text_is_escaped() {
        let param = CreateVenueParam::from_dto(VenuePayloadDto {
            name: "Tom & Jerry's".to_string(),
            address1: " 1 Main St ".to_string(),
            city: Some("Hong Kong".to_string()),
            phone: Some("21234567".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(param.name, "Tom &amp; Jerry&#x27;s");
        assert_eq!(param.address1, "1 Main St");
        assert_eq!(param.city.as_deref(), Some("Hong Kong"));
    }
}
