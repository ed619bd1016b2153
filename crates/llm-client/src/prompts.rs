//! Itinerary planner forms and their prompts.
//!
//! Each planner section has a fixed instruction prompt and a form with a
//! fixed set of options. A filled form renders as `Label: value` lines,
//! with multi-select answers joined by `", "`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of form options with display labels.
///
/// Labels double as the serde representation, and parsing accepts them
/// case-insensitively with `-`, `_` and spaces treated alike.
macro_rules! form_option {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:tt),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| normalize(option.label()) == wanted)
                    .ok_or_else(|| {
                        format!(
                            "unknown option '{}', expected one of: {}",
                            s,
                            join_labels(Self::ALL)
                        )
                    })
            }
        }
    };
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
        .collect()
}

/// Join option labels with `", "`, the way multi-select answers are shown
pub fn join_labels<T: fmt::Display>(options: &[T]) -> String {
    options
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

form_option!(
    /// Who is travelling
    TravelParty {
        Solo => "Solo",
        Couple => "Couple",
        Family => "Family",
        Friends => "Friends",
    }
);

form_option!(
    Activity {
        Adventure => "Adventure",
        Relaxation => "Relaxation",
        Cultural => "Cultural",
        Shopping => "Shopping",
        Nightlife => "Nightlife",
    }
);

form_option!(
    AccommodationType {
        Hotels => "Hotels",
        Hostels => "Hostels",
        VacationRentals => "Vacation Rentals",
        Camping => "Camping",
    }
);

form_option!(
    Proximity {
        MajorAttractions => "Close to major attractions",
        WellConnected => "Well-connected areas",
        QuietNeighborhoods => "Quiet neighborhoods",
    }
);

form_option!(
    TransportMode {
        Car => "Car",
        Train => "Train",
        Flight => "Flight",
        Bike => "Bike",
    }
);

form_option!(
    RentalService {
        Car => "Car Rentals",
        Bike => "Bike Rentals",
        EScooter => "E-scooter Rentals",
        Campervan => "RV or Campervan Rentals",
    }
);

form_option!(
    PublicTransport {
        Urban => "Urban Travel",
        LongDistance => "Long-Distance Travel",
        EcoConscious => "Eco-conscious options",
        LocalExperiences => "Local Experiences",
    }
);

form_option!(
    DietaryRestriction {
        Vegan => "Vegan",
        Vegetarian => "Vegetarian",
        Halal => "Halal",
        GlutenFree => "Gluten-Free",
        NoRestrictions => "No Restrictions",
    }
);

form_option!(
    LocalCuisine {
        AuthenticFlavors => "Exploring Authentic Flavors",
        StreetFood => "Street Food",
    }
);

form_option!(
    DiningExperience {
        FineDining => "Fine Dining",
        CasualDining => "Casual Dining",
        StreetVendors => "Street Vendors",
    }
);

form_option!(
    Ambiance {
        Romantic => "Romantic",
        FamilyFriendly => "Family-Friendly",
        Trendy => "Trendy",
    }
);

form_option!(
    Cuisine {
        Italian => "Italian",
        Thai => "Thai",
        Indian => "Indian",
        Fusion => "Fusion",
        LocalSpecialties => "Local Specialties",
    }
);

// =============================================================================
// Sections
// =============================================================================

/// The four planner sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerSection {
    Trip,
    Accommodation,
    Transport,
    Food,
}

impl PlannerSection {
    pub const ALL: [PlannerSection; 4] = [
        PlannerSection::Trip,
        PlannerSection::Accommodation,
        PlannerSection::Transport,
        PlannerSection::Food,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlannerSection::Trip => "trip",
            PlannerSection::Accommodation => "accommodation",
            PlannerSection::Transport => "transport",
            PlannerSection::Food => "food",
        }
    }

    /// Title shown above the model's answer
    pub fn heading(&self) -> &'static str {
        match self {
            PlannerSection::Trip => "Itinerary Planner",
            PlannerSection::Accommodation => "Accommodation Recommendations",
            PlannerSection::Transport => "Transport Recommendations",
            PlannerSection::Food => "Food Recommendations",
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            PlannerSection::Trip => TRIP_INSTRUCTIONS,
            PlannerSection::Accommodation => ACCOMMODATION_INSTRUCTIONS,
            PlannerSection::Transport => TRANSPORT_INSTRUCTIONS,
            PlannerSection::Food => FOOD_INSTRUCTIONS,
        }
    }
}

impl fmt::Display for PlannerSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TRIP_INSTRUCTIONS: &str = "\
You are an expert Tour Planner and Travel Consultant. Your job is to create a highly personalized travel plan based on the following attributes:
1. Location: The main destination(s) or cities provided by the user.
2. Budget: Plan activities, accommodations, and meals within the specified budget range.
3. Travel Dates (Duration): Include plans for the given number of days or estimate an appropriate duration if not provided. Suggest suitable travel dates or seasons.
4. Travel Party: Cater to the group type (e.g., solo traveler, couple, family, or friends) and their specific needs or dynamics.
5. Activities and Interests: Focus on the user's preferences such as adventure (e.g., hiking, water sports), relaxation (e.g., spa, beaches), cultural (e.g., museums, heritage sites), or nightlife and shopping.
For the plan:
- Suggest an optimal itinerary with day-wise recommendations for activities and places to visit.
- Highlight hidden secrets, must-visit landmarks, and off-the-beaten-path gems.
- Mention the best time or season to visit the destination.
- Provide safety tips, sustainability tips, and any other special considerations.
Return the response in markdown format for easy readability, with clear headings, subheadings, and a day-wise itinerary breakdown.";

const ACCOMMODATION_INSTRUCTIONS: &str = "\
You are an expert Accommodation Advisor. Your primary goal is to provide tailored accommodation recommendations based on the user's input preferences.
Consider the following factors:
1. Location: The main destination(s) or cities provided by the user.
2. Budget: Recommendations should align with the budget range provided (e.g., low, medium, high).
3. Type of Accommodation: The user has specified their preferred type, such as Hotels, Hostels, Vacation Rentals, or Camping.
4. Proximity to Attractions: Consider the user's proximity preferences, whether they prefer accommodations close to major attractions, in well-connected areas, or in quiet neighborhoods.
5. Travel Party: Adjust recommendations to suit the travel party, such as solo travelers, couples, families, or groups of friends. For example:
    - Families: Family-friendly accommodations with extra amenities for kids.
    - Couples: Romantic settings or privacy-focused options.
    - Solo Travelers: Budget-friendly or dorm-style rooms.
    - Friends: Spacious and social settings like hostels or group vacation rentals.
For the Accommodation:
- Provide rating of the Hotels/Hostels/Vacation Rentals, or Camping (in a table format)
- Top 5 hotels within the budget and proximity to Attractions given by the user with address and average cost per night (in a table format)
Format the response in markdown for clear presentation.";

const TRANSPORT_INSTRUCTIONS: &str = "\
You are a highly skilled Transport Advisor, dedicated to delivering personalized and efficient transport recommendations tailored to the user's specific preferences. When crafting your suggestions, consider the following key factors:
1. Location:
    Take into account the primary destinations or cities specified by the user.
    Assess the geographical layout, accessibility, and connectivity between the locations.
2. Mode of Transport:
    Offer a range of options, including car, train, flight, and bike, based on the user's priorities such as speed, convenience, or scenic experiences.
    Highlight any unique travel opportunities available at the specified location, such as scenic train routes or self-drive tours.
3. Availability of Rental Services:
    Provide insights into rental options available, including car rentals, bike rentals, e-scooter rentals, and specialized options like RV or campervan rentals.
    Include details about the accessibility of rental services (e.g., availability near airports, train stations, or city centers) and their suitability for the user's itinerary.
4. Public Transport Preferences:
    Offer recommendations for urban and intercity public transportation, such as metro systems, buses, or high-speed trains.
    Suggest eco-conscious options like electric buses or carpooling services for environmentally aware travelers.
    Highlight local experiences that can be gained from public transportation, such as trams in historic districts or scenic ferry rides.
5. Tailoring the Suggestions:
    Ensure that your recommendations align with the travel party's needs, whether they are solo travelers, couples, families, or groups of friends. For example:
    Family trips: Focus on safe and convenient modes of transport, such as car rentals or direct train connections.
    Eco-conscious travelers: Recommend options like electric car rentals or public transport networks with green certifications.
Deliver your recommendations in a clear, user-friendly manner using markdown, ensuring key points are emphasized for quick comprehension. \
Additionally, include practical tips, such as links to transport websites, ticket booking platforms, or rental services. \
Tailor your tone to be professional, approachable, and engaging, ensuring users feel guided and confident in their travel planning.";

const FOOD_INSTRUCTIONS: &str = "\
You are an expert Travel and Culinary Advisor. Your job is to provide personalized food recommendations based on the user's preferences.
Key Input Considerations:
1. Location:
    Take into account the specified destination to tailor your recommendations to the local culture, availability of services, and unique culinary experiences.
2. Dietary Restrictions:
    Address the user's dietary needs such as vegan, vegetarian, halal, gluten-free, or No Restrictions options. Ensure all recommendations respect these restrictions without compromising on taste and variety.
3. Interest in Local Cuisine:
    Explore the user's interest in local culinary experiences, such as trying authentic dishes, or enjoying street food. Incorporate activities and dining options that align with these interests.
4. Dining Experience:
    Provide suggestions that match the user's preferred dining style, whether it's fine dining for a sophisticated evening, casual dining for relaxed meals, or street vendors for quick and authentic local bites.
5. Ambiance Preferences:
    Include ambiance preferences, such as romantic settings for couples, family-friendly environments for larger groups, or trendy spots for social gatherings.
6. Cuisine Variety:
    Recommend restaurants and eateries offering a wide range of cuisines, including Italian, Thai, Indian, fusion dishes, or local specialties.
Return the response using markdown.";

// =============================================================================
// Forms
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripForm {
    pub location: String,
    pub budget: String,
    pub travel_dates: String,
    pub travel_party: TravelParty,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccommodationForm {
    pub location: String,
    pub budget: String,
    pub accommodation_type: AccommodationType,
    #[serde(default)]
    pub proximity: Vec<Proximity>,
    pub travel_party: TravelParty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportForm {
    pub location: String,
    pub mode: TransportMode,
    #[serde(default)]
    pub rental_services: Vec<RentalService>,
    #[serde(default)]
    pub public_transport: Vec<PublicTransport>,
    pub travel_party: TravelParty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodForm {
    pub location: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    pub local_cuisine: Vec<LocalCuisine>,
    pub dining_experience: DiningExperience,
    pub ambiance: Ambiance,
    #[serde(default)]
    pub cuisines: Vec<Cuisine>,
}

/// A filled planner form, tagged by section on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ItineraryRequest {
    Trip(TripForm),
    Accommodation(AccommodationForm),
    Transport(TransportForm),
    Food(FoodForm),
}

impl ItineraryRequest {
    pub fn section(&self) -> PlannerSection {
        match self {
            ItineraryRequest::Trip(_) => PlannerSection::Trip,
            ItineraryRequest::Accommodation(_) => PlannerSection::Accommodation,
            ItineraryRequest::Transport(_) => PlannerSection::Transport,
            ItineraryRequest::Food(_) => PlannerSection::Food,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            ItineraryRequest::Trip(form) => &form.location,
            ItineraryRequest::Accommodation(form) => &form.location,
            ItineraryRequest::Transport(form) => &form.location,
            ItineraryRequest::Food(form) => &form.location,
        }
    }

    pub fn heading(&self) -> &'static str {
        self.section().heading()
    }

    /// Reject forms the model cannot plan for
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.location().trim().is_empty() {
            return Err("Location cannot be empty");
        }
        Ok(())
    }

    pub fn instructions(&self) -> &'static str {
        self.section().instructions()
    }

    /// The form as `Label: value` lines
    pub fn render_input(&self) -> String {
        let lines: Vec<(&str, String)> = match self {
            ItineraryRequest::Trip(form) => vec![
                ("Location", form.location.clone()),
                ("Budget", form.budget.clone()),
                ("Travel Dates", form.travel_dates.clone()),
                ("Travel Party", form.travel_party.to_string()),
                ("Activities and Interests", join_labels(&form.activities)),
            ],
            ItineraryRequest::Accommodation(form) => vec![
                ("Location", form.location.clone()),
                ("Budget", form.budget.clone()),
                ("Accommodation Type", form.accommodation_type.to_string()),
                ("Proximity to Attractions", join_labels(&form.proximity)),
                ("Travel Party", form.travel_party.to_string()),
            ],
            ItineraryRequest::Transport(form) => vec![
                ("Location", form.location.clone()),
                ("Mode of Transport", form.mode.to_string()),
                ("Rental Services", join_labels(&form.rental_services)),
                ("Public Transport Preferences", join_labels(&form.public_transport)),
                ("Travel Party", form.travel_party.to_string()),
            ],
            ItineraryRequest::Food(form) => vec![
                ("Location", form.location.clone()),
                ("Dietary Restrictions", join_labels(&form.dietary_restrictions)),
                ("Interest in Local Cuisine", join_labels(&form.local_cuisine)),
                ("Dining Experience", form.dining_experience.to_string()),
                ("Ambiance Preferences", form.ambiance.to_string()),
                ("Cuisine Variety", join_labels(&form.cuisines)),
            ],
        };

        lines
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
