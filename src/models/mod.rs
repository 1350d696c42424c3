//! Data models
//!
//! Rust structs mirroring the MyFoodRepo JSON payloads.

mod dish;
mod food;
mod installation;
mod media;
mod nutrient;
mod recognition;
mod response;
mod subject;
mod user;

pub use dish::{
    CommentAuthor, Dish, DishComment, DishData, DishFood, DishRecord, DishStatus, DishesData,
    FoodReference, PatchDish, PatchDishFood, PostDish, PostDishComment, PostDishFood,
};
pub use food::{
    translate, Food, FoodData, FoodImage, FoodImageCategory, FoodNutrient, FoodUnit, Translations,
};
pub use installation::{new_installation_uuid, InstallationInfo};
pub use media::{Media, MediaType, MediaVariant, MediaVariantName, PostMedia};
pub use nutrient::{
    category_nutrients, nutrient_category, Nutrient, NutrientsData, CATEGORY_NUTRIENTS,
};
pub use recognition::{
    image_data_uri, DishRecognition, RecognitionData, RecognitionPrediction,
    DEFAULT_RECOGNITION_INPUT_SIZE, STATUS_IMAGE_PROCESSED,
};
pub use response::{
    ApiResponse, Environment, ErrorBody, FieldIssues, Info, Issue, Message, Meta, RawData,
    ServiceError, SessionData,
};
pub use subject::{Subject, SubjectsData};
pub use user::{
    AuthType, Login, PartialUser, Sex, User, UserData, UserProfile, UserRecord, WeightEntry,
};

#[cfg(test)]
pub(crate) use dish::tests::sample_dish_json;
