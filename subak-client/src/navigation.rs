/// Экраны, на которые умеет переходить приложение.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Главные вкладки с нижним меню.
    FooterTabs,
}

impl Destination {
    /// Имя маршрута в роутере.
    pub fn route_name(self) -> &'static str {
        match self {
            Self::FooterTabs => "FooterTabs",
        }
    }
}

/// Внешний роутер. Реализация навигации не входит в эту библиотеку.
pub trait Navigator: Send + Sync {
    /// Переход на экран.
    fn navigate(&self, destination: Destination);

    /// Возврат на предыдущий экран.
    fn go_back(&self);
}
