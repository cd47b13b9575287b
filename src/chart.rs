use crate::style;
use data::chart::ChartInput;
use data::util::{abbr_large_numbers, guesstimate_ticks, round_to_next_tick};

use iced::widget::canvas::{self, Cache, Frame, Path, Stroke};
use iced::{Alignment, Element, Length, Point, Rectangle, Renderer, Size, Theme, mouse};

const TEXT_SIZE: f32 = 12.0; // اندازه متن برچسب‌ها

// حاشیه‌های ناحیه رسم برای جا دادن برچسب محورها
const MARGIN_LEFT: f32 = 56.0;
const MARGIN_BOTTOM: f32 = 28.0;
const MARGIN_TOP: f32 = 16.0;
const MARGIN_RIGHT: f32 = 20.0;

// حداکثر تعداد برچسب قابل نمایش روی محور افقی
const MAX_X_LABELS: usize = 12;

/// نمودار خطی قیمت که روی بوم (Canvas) رسم می‌شود
///
/// هر دو محور از صفر شروع می‌شوند و ابعاد رسم از اندازه فعلی ویجت
/// گرفته می‌شود، بنابراین نمودار با تغییر اندازه پنجره تطبیق می‌یابد.
pub struct PriceChart {
    input: ChartInput,
    cache: Cache,
}

impl PriceChart {
    pub fn new(input: ChartInput) -> Self {
        Self {
            input,
            cache: Cache::default(),
        }
    }

    /// جایگزینی داده نمودار و رسم مجدد
    pub fn set_input(&mut self, input: ChartInput) {
        self.input = input;
        self.invalidate();
    }

    /// بی‌اعتبار کردن کش برای رندر مجدد کامل (مثلاً بعد از تغییر تم)
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn view<'a, Message: 'a>(&'a self) -> Element<'a, Message> {
        iced::widget::container(
            canvas::Canvas::new(self)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .style(style::chart_container)
        .padding(4)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// ناحیه داخلی رسم بعد از کسر حاشیه برچسب‌ها
    fn plot_area(size: Size) -> Rectangle {
        Rectangle {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: (size.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (size.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    /// مختصات افقی نقطه `index`ام از `count` نقطه
    fn x_at(plot: Rectangle, index: usize, count: usize) -> f32 {
        if count <= 1 {
            plot.x + plot.width / 2.0
        } else {
            plot.x + plot.width * index as f32 / (count - 1) as f32
        }
    }

    /// مختصات عمودی یک مقدار؛ محور از صفر شروع می‌شود
    fn y_at(plot: Rectangle, value: f32, y_max: f32) -> f32 {
        plot.y + plot.height * (1.0 - value / y_max)
    }

    fn draw_placeholder(frame: &mut Frame, theme: &Theme) {
        let palette = theme.extended_palette();

        frame.fill_text(canvas::Text {
            content: "No chart data".to_string(),
            position: frame.center(),
            color: palette.background.strong.color,
            size: iced::Pixels(TEXT_SIZE + 2.0),
            align_x: Alignment::Center.into(),
            align_y: Alignment::Center.into(),
            ..Default::default()
        });
    }

    fn draw_chart(&self, frame: &mut Frame, theme: &Theme, y_max_value: f32) {
        let palette = theme.extended_palette();
        let plot = Self::plot_area(frame.size());
        let point_count = self.input.labels().len();

        // سقف محور عمودی: گرد شده به گام بعدی بالای بیشینه داده
        let tick_size = guesstimate_ticks(y_max_value);
        let y_max = round_to_next_tick(y_max_value, tick_size, false).max(tick_size);

        // خطوط راهنمای افقی به همراه برچسب قیمت
        let mut tick_value = 0.0;
        while tick_value <= y_max + tick_size / 2.0 {
            let y = Self::y_at(plot, tick_value, y_max);

            frame.stroke(
                &Path::line(Point::new(plot.x, y), Point::new(plot.x + plot.width, y)),
                Stroke::default()
                    .with_width(1.0)
                    .with_color(palette.background.weak.color.scale_alpha(0.6)),
            );

            frame.fill_text(canvas::Text {
                content: abbr_large_numbers(tick_value),
                position: Point::new(plot.x - 8.0, y),
                color: palette.background.base.text,
                size: iced::Pixels(TEXT_SIZE - 1.0),
                align_x: Alignment::End.into(),
                align_y: Alignment::Center.into(),
                ..Default::default()
            });

            tick_value += tick_size;
        }

        // برچسب‌های محور افقی؛ در صورت شلوغی یکی در میان نمایش داده می‌شوند
        let label_step = point_count.div_ceil(MAX_X_LABELS).max(1);
        for (index, label) in self.input.labels().iter().enumerate() {
            if index % label_step != 0 {
                continue;
            }

            let x = Self::x_at(plot, index, point_count);

            frame.fill_text(canvas::Text {
                content: label.clone(),
                position: Point::new(x, plot.y + plot.height + 8.0),
                color: palette.background.base.text,
                size: iced::Pixels(TEXT_SIZE - 1.0),
                align_x: Alignment::Center.into(),
                align_y: Alignment::Start.into(),
                ..Default::default()
            });
        }

        // رسم هر سری به صورت خط شکسته؛ مقادیر NaN خط را قطع می‌کنند
        for series in self.input.series() {
            let mut segment: Vec<Point> = Vec::new();

            let mut draw_segment = |segment: &mut Vec<Point>, frame: &mut Frame| {
                if segment.len() > 1 {
                    let path = Path::new(|builder| {
                        builder.move_to(segment[0]);
                        for point in &segment[1..] {
                            builder.line_to(*point);
                        }
                    });

                    frame.stroke(
                        &path,
                        Stroke::default().with_width(2.0).with_color(series.color),
                    );

                    if series.filled {
                        // سطح زیر خط تا پایه صفر پر می‌شود
                        let baseline = Self::y_at(plot, 0.0, y_max);
                        let fill = Path::new(|builder| {
                            builder.move_to(Point::new(segment[0].x, baseline));
                            for point in segment.iter() {
                                builder.line_to(*point);
                            }
                            let last = segment[segment.len() - 1];
                            builder.line_to(Point::new(last.x, baseline));
                            builder.close();
                        });

                        frame.fill(&fill, series.color.scale_alpha(0.2));
                    }
                }
                segment.clear();
            };

            for (index, value) in series.values.iter().enumerate() {
                if value.is_finite() {
                    segment.push(Point::new(
                        Self::x_at(plot, index, point_count),
                        Self::y_at(plot, *value, y_max),
                    ));
                } else {
                    draw_segment(&mut segment, frame);
                }
            }
            draw_segment(&mut segment, frame);
        }

        // راهنمای سری‌ها در بالای نمودار
        let mut legend_x = plot.x;
        for series in self.input.series() {
            frame.fill_rectangle(
                Point::new(legend_x, plot.y - 12.0),
                Size::new(8.0, 8.0),
                series.color,
            );

            frame.fill_text(canvas::Text {
                content: series.label.clone(),
                position: Point::new(legend_x + 12.0, plot.y - 8.0),
                color: palette.background.base.text,
                size: iced::Pixels(TEXT_SIZE - 1.0),
                align_x: Alignment::Start.into(),
                align_y: Alignment::Center.into(),
                ..Default::default()
            });

            legend_x += 12.0 + series.label.len() as f32 * (TEXT_SIZE * 0.6) + 16.0;
        }
    }
}

impl<Message> canvas::Program<Message> for PriceChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            match self.input.max_value() {
                Some(y_max) if !self.input.is_empty() => {
                    self.draw_chart(frame, theme, y_max.max(0.0));
                }
                // بدون داده قابل رسم؛ به جای خطا یک متن جایگزین نشان داده می‌شود
                _ => Self::draw_placeholder(frame, theme),
            }
        });

        vec![geometry]
    }
}
