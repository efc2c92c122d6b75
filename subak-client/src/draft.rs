use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::models::CreatePostRequest;

/// Максимальное число фотографий в объявлении.
pub const MAX_IMAGES: u8 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Способ сделки.
pub enum DealType {
    /// Продажа за указанную цену.
    #[default]
    Sale,
    /// Бесплатная раздача, цена всегда 0.
    Giveaway,
}

impl DealType {
    /// Подпись переключателя на экране.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sale => "판매하기",
            Self::Giveaway => "나눔하기",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Ошибки редактирования черновика.
pub enum DraftError {
    /// Цена заблокирована, пока выбрана раздача.
    #[error("price is locked for giveaway posts")]
    PriceLocked,

    /// Введённая цена не является неотрицательным целым числом.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Достигнут лимит фотографий.
    #[error("at most {MAX_IMAGES} images are allowed")]
    TooManyImages,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Флаги незаполненных обязательных полей.
pub struct MissingFields {
    /// Нет заголовка.
    pub title: bool,
    /// Нет описания.
    pub content: bool,
}

impl MissingFields {
    /// `true`, если не хватает хотя бы одного поля.
    pub fn any(self) -> bool {
        self.title || self.content
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
/// Черновик объявления, живущий только пока открыт экран.
pub struct DraftPost {
    #[validate(length(min = 1))]
    title: String,
    price: u64,
    deal_type: DealType,
    #[validate(length(min = 1))]
    content: String,
    image_count: u8,
}

impl DraftPost {
    /// Пустой черновик: продажа, цена 0, без фото.
    pub fn new() -> Self {
        Self::default()
    }

    /// Заголовок.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Описание.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Цена в вонах.
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Способ сделки.
    pub fn deal_type(&self) -> DealType {
        self.deal_type
    }

    /// Число прикреплённых фото.
    pub fn image_count(&self) -> u8 {
        self.image_count
    }

    /// Заменяет заголовок.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Заменяет описание.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Цену можно менять только при продаже.
    pub fn is_price_editable(&self) -> bool {
        self.deal_type == DealType::Sale
    }

    /// Устанавливает цену.
    pub fn set_price(&mut self, price: u64) -> Result<(), DraftError> {
        if !self.is_price_editable() {
            return Err(DraftError::PriceLocked);
        }
        self.price = price;
        Ok(())
    }

    /// Устанавливает цену из текста поля ввода.
    ///
    /// Пустая строка означает 0. При ошибке цена не меняется.
    pub fn set_price_text(&mut self, text: &str) -> Result<(), DraftError> {
        if !self.is_price_editable() {
            return Err(DraftError::PriceLocked);
        }
        let price = parse_price(text)?;
        self.price = price;
        Ok(())
    }

    /// Переключает способ сделки.
    ///
    /// Раздача обнуляет цену; возврат к продаже цену не трогает.
    pub fn select_deal(&mut self, deal_type: DealType) {
        self.deal_type = deal_type;
        if deal_type == DealType::Giveaway {
            self.price = 0;
        }
    }

    /// Добавляет фото, не больше `MAX_IMAGES`.
    pub fn add_image(&mut self) -> Result<(), DraftError> {
        if self.image_count >= MAX_IMAGES {
            return Err(DraftError::TooManyImages);
        }
        self.image_count += 1;
        Ok(())
    }

    /// Убирает одно фото.
    pub fn remove_image(&mut self) {
        self.image_count = self.image_count.saturating_sub(1);
    }

    /// Счётчик фото вида `3/10`.
    pub fn image_counter_label(&self) -> String {
        format!("{}/{}", self.image_count, MAX_IMAGES)
    }

    /// Какие обязательные поля пустые.
    pub fn missing_fields(&self) -> MissingFields {
        match self.validate() {
            Ok(()) => MissingFields::default(),
            Err(errors) => {
                let fields = errors.field_errors();
                MissingFields {
                    title: fields.contains_key("title"),
                    content: fields.contains_key("content"),
                }
            }
        }
    }

    /// Тело запроса для отправки на сервер.
    pub fn to_request(&self) -> CreatePostRequest {
        CreatePostRequest {
            post_title: self.title.clone(),
            price: self.price,
        }
    }
}

fn parse_price(text: &str) -> Result<u64, DraftError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(DraftError::InvalidPrice(text.to_string()));
    }
    text.parse::<u64>()
        .map_err(|_| DraftError::InvalidPrice(text.to_string()))
}
