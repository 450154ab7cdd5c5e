//! Tree rendering for 2D configuration spaces.
//!
//! The renderer collaborator: draws the tree snapshot (edges parent to
//! child), start/goal markers and optionally a solution polyline. The
//! planners themselves perform no I/O.

use plotters::prelude::*;

use crate::solution::PlanSolution;
use crate::tree::PlanningTree;

pub fn draw_tree(
    filename: &str,
    tree: &PlanningTree<2>,
    solution: Option<&PlanSolution>,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = tree.view();
    let margin = 0.5;
    let min_x = view.configs.iter().fold(f64::INFINITY, |a, c| a.min(c.x)) - margin;
    let max_x = view
        .configs
        .iter()
        .fold(f64::NEG_INFINITY, |a, c| a.max(c.x))
        + margin;
    let min_y = view.configs.iter().fold(f64::INFINITY, |a, c| a.min(c.y)) - margin;
    let max_y = view
        .configs
        .iter()
        .fold(f64::NEG_INFINITY, |a, c| a.max(c.y))
        + margin;

    let drawing_area = BitMapBackend::new(filename, (640, 480)).into_drawing_area();
    drawing_area.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&drawing_area)
        .caption("Tree", ("sans-serif", 40).into_font())
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(min_x as f32..max_x as f32, min_y as f32..max_y as f32)?;

    chart
        .configure_mesh()
        .x_labels(10)
        .y_labels(10)
        .x_label_formatter(&|x| format!("{:.1}", x))
        .y_label_formatter(&|x| format!("{:.1}", x))
        .draw()?;

    for (i, parent) in view.parents.iter().enumerate() {
        let Some(p) = parent else { continue };
        let points = vec![
            (view.configs[*p].x as f32, view.configs[*p].y as f32),
            (view.configs[i].x as f32, view.configs[i].y as f32),
        ];
        chart.draw_series(LineSeries::new(points, &BLACK))?;
    }

    let markers = vec![
        (tree.start().x as f32, tree.start().y as f32),
        (tree.goal().x as f32, tree.goal().y as f32),
    ];
    chart.draw_series(PointSeries::of_element(markers, 5, &RED, &|c, s, st| {
        EmptyElement::at(c) + Circle::new((0, 0), s, st.filled())
    }))?;

    if let Some(solution) = solution {
        let points = solution
            .states
            .iter()
            .map(|s| (s[0] as f32, s[1] as f32))
            .collect::<Vec<(f32, f32)>>();
        chart.draw_series(LineSeries::new(points, &BLUE))?;
    }

    drawing_area.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PlannerParams;
    use crate::rrt_star::RrtStar;
    use nalgebra::Vector2;

    #[test]
    fn test_draw_tree() -> Result<(), Box<dyn std::error::Error>> {
        let params = PlannerParams {
            iteration_budget: 100,
            seed: Some(3),
            ..Default::default()
        };
        let mut star = RrtStar::new(
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            params,
            |_| true,
        )?;
        star.grow()?;
        let solution = star.solution(star.tree().len() - 1)?;

        let path = std::env::temp_dir().join("cspace_rrt_tree.png");
        let filename = path.to_str().unwrap();
        draw_tree(filename, star.tree(), Some(&solution))?;
        assert!(path.exists());
        Ok(())
    }
}
