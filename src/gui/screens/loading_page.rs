use iced::{
    Element,
    widget::{container, text},
};

pub fn view<'a, Message: 'a>(error: Option<&'a str>) -> Element<'a, Message> {
    let content = match error {
        Some(error) => text(format!("No se pudo abrir el tablero: {error}")),
        None => text("Cargando..."),
    };
    container(content)
        .center_x(iced::Length::Fill)
        .center_y(iced::Length::Fill)
        .into()
}
