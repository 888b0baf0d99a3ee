//! Hotel records as served by the backend.

use serde::{Deserialize, Serialize};

/// Longest telephone number a hotel form accepts, in characters.
pub const MAX_TEL_LEN: usize = 10;

/// Longest postal code a hotel form accepts, in characters.
pub const MAX_POSTALCODE_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub address: String,
    pub district: String,
    pub province: String,
    pub postalcode: String,
    pub tel: String,
    #[serde(default)]
    pub picture: String,
}

/// Hotel fields without the server-assigned id; the body of create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelDraft {
    pub name: String,
    pub address: String,
    pub district: String,
    pub province: String,
    pub postalcode: String,
    pub tel: String,
    pub picture: String,
}

impl Hotel {
    pub fn draft(&self) -> HotelDraft {
        HotelDraft::from(self)
    }
}

impl HotelDraft {
    /// Clip `tel` and `postalcode` to the lengths the hotel form allows.
    /// Other fields pass through unchanged.
    pub fn normalized(mut self) -> Self {
        clip(&mut self.tel, MAX_TEL_LEN);
        clip(&mut self.postalcode, MAX_POSTALCODE_LEN);
        self
    }
}

fn clip(value: &mut String, max_chars: usize) {
    if let Some((idx, _)) = value.char_indices().nth(max_chars) {
        value.truncate(idx);
    }
}

impl From<&Hotel> for HotelDraft {
    fn from(hotel: &Hotel) -> Self {
        Self {
            name: hotel.name.clone(),
            address: hotel.address.clone(),
            district: hotel.district.clone(),
            province: hotel.province.clone(),
            postalcode: hotel.postalcode.clone(),
            tel: hotel.tel.clone(),
            picture: hotel.picture.clone(),
        }
    }
}
