use serde::{Deserialize, Deserializer, Serialize};

/// Decodes an explicit JSON `null` as the field's zero value, the same way a
/// missing key is handled by `#[serde(default)]`.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============ Lookup Models (request bodies) ============

/// A lookup by physical address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressLookup {
    pub last_name: String,
    pub first_name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// A lookup by email and name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLookup {
    pub email: String,
    pub last_name: String,
    pub first_name: String,
}

/// A lookup by phone number and name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneLookup {
    pub phone: String,
    pub last_name: String,
    pub first_name: String,
}

/// A lookup paired with the scoring model to run against the matched profile.
///
/// The lookup's fields are written at the top level of the JSON object, next
/// to `model`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLookup<L> {
    #[serde(flatten)]
    pub lookup: L,
    pub model: String,
}

impl<L> ScoreLookup<L> {
    pub fn new(lookup: L, model: impl Into<String>) -> Self {
        Self {
            lookup,
            model: model.into(),
        }
    }
}

/// An address lookup for the scoring endpoint.
pub type AddressLookupScore = ScoreLookup<AddressLookup>;
/// An email lookup for the scoring endpoint.
pub type EmailLookupScore = ScoreLookup<EmailLookup>;
/// A phone lookup for the scoring endpoint.
pub type PhoneLookupScore = ScoreLookup<PhoneLookup>;

/// A single lookup submitted as part of a batch. Unused keys are sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchLookup {
    pub last_name: String,
    pub first_name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub email: String,
    pub phone: String,
}

impl From<AddressLookup> for BatchLookup {
    fn from(l: AddressLookup) -> Self {
        Self {
            last_name: l.last_name,
            first_name: l.first_name,
            address_line1: l.address_line1,
            address_line2: l.address_line2,
            city: l.city,
            state: l.state,
            zip: l.zip,
            ..Default::default()
        }
    }
}

impl From<EmailLookup> for BatchLookup {
    fn from(l: EmailLookup) -> Self {
        Self {
            last_name: l.last_name,
            first_name: l.first_name,
            email: l.email,
            ..Default::default()
        }
    }
}

impl From<PhoneLookup> for BatchLookup {
    fn from(l: PhoneLookup) -> Self {
        Self {
            last_name: l.last_name,
            first_name: l.first_name,
            phone: l.phone,
            ..Default::default()
        }
    }
}

/// A batch of lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub profiles: Vec<BatchLookup>,
}

impl Batch {
    pub fn new(profiles: Vec<BatchLookup>) -> Self {
        Self { profiles }
    }

    pub fn push(&mut self, lookup: impl Into<BatchLookup>) {
        self.profiles.push(lookup.into());
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl<L: Into<BatchLookup>> FromIterator<L> for Batch {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ============ Shared Value Types ============

/// A range as reported by WealthEngine (income, assets, donations, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WealthEngineRange {
    #[serde(deserialize_with = "null_default")]
    pub min: i64,
    #[serde(deserialize_with = "null_default")]
    pub max: i64,
    #[serde(deserialize_with = "null_default")]
    pub value: i64,
    #[serde(deserialize_with = "null_default")]
    pub text: String,
    #[serde(deserialize_with = "null_default")]
    pub text_low: String,
    #[serde(deserialize_with = "null_default")]
    pub text_high: String,
}

/// A coded value with its human-readable text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextAndValue {
    #[serde(deserialize_with = "null_default")]
    pub text: String,
    #[serde(deserialize_with = "null_default")]
    pub value: String,
}

/// A person's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanBeing {
    #[serde(deserialize_with = "null_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_default")]
    pub middle_name: String,
}

/// A physical address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_default")]
    pub street_line1: String,
    #[serde(deserialize_with = "null_default")]
    pub street_line2: String,
    #[serde(deserialize_with = "null_default")]
    pub street_line3: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    #[serde(deserialize_with = "null_default")]
    pub state: TextAndValue,
    #[serde(deserialize_with = "null_default")]
    pub postal_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "null_default")]
    pub address: Address,
    #[serde(deserialize_with = "null_default")]
    pub personal_phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    #[serde(deserialize_with = "null_default")]
    pub email: String,
}

// ============ Profile Sections ============

/// An individual's wealth, including income and assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wealth {
    #[serde(deserialize_with = "null_default")]
    pub cash_on_hand: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub networth: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub total_income: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub business_ownership: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub business_sales_volume: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub accredited_investor: bool,
    #[serde(deserialize_with = "null_default")]
    pub influence_rating: TextAndValue,
    #[serde(deserialize_with = "null_default")]
    pub total_stock: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub stock_holdings_direct: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub stock_holdings_indirect: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub investable_assets: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub total_assets: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub total_pensions: WealthEngineRange,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Professional {
    /// Capitalised on the wire.
    #[serde(rename = "Board_member", alias = "board_member")]
    #[serde(deserialize_with = "null_default")]
    pub board_member: bool,
}

/// Real estate holdings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Realestate {
    #[serde(deserialize_with = "null_default")]
    pub total_num_properties: i64,
    #[serde(alias = "Total_realestate_value")]
    #[serde(deserialize_with = "null_default")]
    pub total_realestate_value: WealthEngineRange,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gender {
    #[serde(deserialize_with = "null_default")]
    pub value: String,
    #[serde(deserialize_with = "null_default")]
    pub text: String,
}

/// Who the matched individual is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    #[serde(deserialize_with = "null_default")]
    pub age: i64,
    #[serde(alias = "Gender")]
    #[serde(deserialize_with = "null_default")]
    pub gender: Gender,
    /// Name fields sit at the top level of the identity object.
    #[serde(flatten)]
    pub name: HumanBeing,
    #[serde(deserialize_with = "null_default")]
    pub marital_status: TextAndValue,
    #[serde(deserialize_with = "null_default")]
    pub emails: Vec<Email>,
}

/// An employment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    #[serde(deserialize_with = "null_default")]
    pub org_name: String,
    #[serde(deserialize_with = "null_default")]
    pub org_type: TextAndValue,
    #[serde(deserialize_with = "null_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_default")]
    pub email: String,
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub address: Address,
}

/// A spousal relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    #[serde(alias = "Spouse")]
    #[serde(deserialize_with = "null_default")]
    pub spouse: HumanBeing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Demographics {
    #[serde(deserialize_with = "null_default")]
    pub has_children: bool,
}

/// Vehicles owned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicles {
    #[serde(deserialize_with = "null_default")]
    pub ownership: Vec<TextAndValue>,
}

/// An individual's donation activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Giving {
    #[serde(deserialize_with = "null_default")]
    pub affiliation_inclination: TextAndValue,
    #[serde(deserialize_with = "null_default")]
    pub p2g_score: TextAndValue,
    #[serde(deserialize_with = "null_default")]
    pub planned_giving: Vec<TextAndValue>,
    #[serde(deserialize_with = "null_default")]
    pub gift_capacity: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub charitable_donations: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub total_political_donations: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub total_donations: WealthEngineRange,
    #[serde(deserialize_with = "null_default")]
    pub estimated_annual_donations: WealthEngineRange,
}

/// A complete WealthEngine profile for one matched individual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub identity: Identity,
    #[serde(deserialize_with = "null_default")]
    pub demographics: Demographics,
    #[serde(deserialize_with = "null_default")]
    pub relationship: Relationship,
    #[serde(deserialize_with = "null_default")]
    pub wealth: Wealth,
    #[serde(deserialize_with = "null_default")]
    pub giving: Giving,
    #[serde(deserialize_with = "null_default")]
    pub locations: Vec<Location>,
    #[serde(deserialize_with = "null_default")]
    pub realestate: Realestate,
    #[serde(deserialize_with = "null_default")]
    pub professional: Professional,
    #[serde(deserialize_with = "null_default")]
    pub vehicles: Vehicles,
    #[serde(deserialize_with = "null_default")]
    pub jobs: Vec<Job>,
}

// ============ Score Models ============

/// The query echoed back by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    #[serde(deserialize_with = "null_default")]
    pub email: String,
    #[serde(deserialize_with = "null_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_default")]
    pub address_line1: String,
    #[serde(deserialize_with = "null_default")]
    pub address_line2: String,
    #[serde(deserialize_with = "null_default")]
    pub city: String,
    #[serde(deserialize_with = "null_default")]
    pub state: String,
    #[serde(deserialize_with = "null_default")]
    pub zip: String,
    #[serde(deserialize_with = "null_default")]
    pub phone: String,
    #[serde(rename = "model")]
    #[serde(deserialize_with = "null_default")]
    pub models: String,
}

/// Request metadata echoed back with score and batch responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    #[serde(deserialize_with = "null_default")]
    pub output_type: String,
    #[serde(deserialize_with = "null_default")]
    pub endpoint: String,
    #[serde(deserialize_with = "null_default")]
    pub environment: String,
    #[serde(alias = "Query")]
    #[serde(deserialize_with = "null_default")]
    pub query: Query,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    #[serde(deserialize_with = "null_default")]
    pub model: String,
    #[serde(deserialize_with = "null_default")]
    pub score: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreProfile {
    #[serde(deserialize_with = "null_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_default")]
    pub scores: Vec<Score>,
}

impl ScoreProfile {
    /// Score produced by the given model, if present.
    pub fn score_for(&self, model: &str) -> Option<i64> {
        self.scores
            .iter()
            .find(|s| s.model == model)
            .map(|s| s.score)
    }
}

/// Response of the scoring endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoredProfile {
    #[serde(deserialize_with = "null_default")]
    pub input: Input,
    #[serde(deserialize_with = "null_default")]
    pub profile: ScoreProfile,
}

// ============ Batch Models ============

/// One result of a batch job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchProfile {
    #[serde(deserialize_with = "null_default")]
    pub input: Input,
    #[serde(deserialize_with = "null_default")]
    pub profile: Profile,
}

/// Handle of a batch job, returned on submission and used to poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchID {
    #[serde(rename = "batchID")]
    pub id: String,
}

impl BatchID {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl std::fmt::Display for BatchID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// Status of a batch job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJobStatus {
    #[serde(rename = "Status", alias = "status")]
    pub status: String,
}

impl BatchJobStatus {
    /// Whether the job reports completion ("complete" / "completed").
    pub fn is_complete(&self) -> bool {
        let s = self.status.trim();
        s.eq_ignore_ascii_case("complete") || s.eq_ignore_ascii_case("completed")
    }

    /// Whether the job reports a terminal failure.
    pub fn is_failed(&self) -> bool {
        let s = self.status.trim();
        s.eq_ignore_ascii_case("failed") || s.eq_ignore_ascii_case("error")
    }

    /// Complete or failed: polling can stop.
    pub fn is_finished(&self) -> bool {
        self.is_complete() || self.is_failed()
    }
}

/// Results of a finished batch job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJobResults {
    pub profiles: Vec<BatchProfile>,
}
