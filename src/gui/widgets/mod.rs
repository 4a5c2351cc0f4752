use iced::{
    Color, Element, Length, Theme, border,
    widget::{Row, button, column, container::Style, container, row, text},
};
use iced_widget::container::bordered_box;

use crate::core::view::Section;

fn tab_style(current: Section, tab: Section) -> impl Fn(&Theme) -> Style {
    move |theme: &Theme| {
        let style = bordered_box(theme).border(border::width(if current == tab { 2.0 } else { 0.0 }));
        if current == tab {
            style.background(theme.palette().primary)
        } else {
            style.background(theme.palette().background)
        }
    }
}

fn banner_style(theme: &Theme) -> Style {
    bordered_box(theme).background(Color {
        a: 0.25,
        ..theme.palette().primary
    })
}

/// Navigation bar, optional notice banner, then the section content.
pub fn layout<'a, Message>(
    current: Section,
    navigate: impl Fn(Section) -> Message,
    notice: Option<(&'a str, Message)>,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let tabs = Row::with_children(Section::ALL.into_iter().map(|section| {
        container(button(text(section.title())).on_press(navigate(section)))
            .style(tab_style(current, section))
            .padding(4)
            .into()
    }))
    .spacing(10);

    let mut content = column![tabs].spacing(20).padding(20);
    if let Some((message, dismiss)) = notice {
        content = content.push(
            container(
                row![text(message).width(Length::Fill), button("OK").on_press(dismiss)]
                    .spacing(10),
            )
            .style(banner_style)
            .padding(10)
            .width(Length::Fill),
        );
    }

    container(content.push(container(main_content.into()).height(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
