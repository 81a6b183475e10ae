// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Section/task/edge op-application helpers used by `apply`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn orientation_for_axis(axis: Axis) -> Orientation {
    match axis {
        Axis::X => Orientation::Vertical,
        Axis::Y => Orientation::Horizontal,
    }
}

fn partition_for(doc: &BoardDocument, orientation: Orientation) -> Vec<Interval> {
    partition_sections(&doc.ordered_sections(orientation), AXIS_HEADER_OFFSET)
}

fn section_orientation(doc: &BoardDocument, section_id: &SectionId) -> Option<Orientation> {
    if doc.sections(Orientation::Vertical).contains(section_id) {
        Some(Orientation::Vertical)
    } else if doc.sections(Orientation::Horizontal).contains(section_id) {
        Some(Orientation::Horizontal)
    } else {
        None
    }
}

/// Writes `captured + amount` back for every collected entity, one batch per
/// entity kind. Batches write absolute coordinates computed from the
/// captured snapshot, never from already-shifted values.
fn apply_shifts(
    doc: &BoardDocument,
    axis: Axis,
    task_shifts: &[(TaskId, f64)],
    edge_shifts: &[(EdgeId, f64)],
    amount: f64,
    delta: &mut DeltaBuilder,
) {
    if amount == 0.0 {
        return;
    }

    if !task_shifts.is_empty() {
        let targets = task_shifts
            .iter()
            .map(|(task_id, captured)| (task_id.clone(), captured + amount))
            .collect::<BTreeMap<_, _>>();
        let keys = targets.keys().cloned().collect::<Vec<_>>();
        doc.tasks().update_many(&keys, |task| {
            if let Some(target) = targets.get(task.task_id()) {
                let mut position = task.position();
                match axis {
                    Axis::X => position.x = *target,
                    Axis::Y => position.y = *target,
                }
                task.set_position(position);
            }
        });
        for key in keys {
            delta.record_updated(EntityRef::Task(key));
        }
    }

    if !edge_shifts.is_empty() {
        let targets = edge_shifts
            .iter()
            .map(|(edge_id, captured)| (edge_id.clone(), captured + amount))
            .collect::<BTreeMap<_, _>>();
        let keys = targets.keys().cloned().collect::<Vec<_>>();
        doc.edges().update_many(&keys, |edge| {
            if let Some(target) = targets.get(edge.edge_id()) {
                edge.set_break_x(*target);
            }
        });
        for key in keys {
            delta.record_updated(EntityRef::Edge(key));
        }
    }
}

/// Recomputes every task's derived section membership against the partition
/// as it exists after the structural change, writing only actual changes.
fn refresh_memberships(doc: &BoardDocument, delta: &mut DeltaBuilder) {
    let partition_x = partition_for(doc, Orientation::Vertical);
    let partition_y = partition_for(doc, Orientation::Horizontal);

    let mut targets = BTreeMap::new();
    for task in doc.tasks().all() {
        let hit = map_to_sections(&partition_x, &partition_y, task.position());
        if task.section_x() != hit.section_x.as_ref() || task.section_y() != hit.section_y.as_ref()
        {
            targets.insert(task.task_id().clone(), hit);
        }
    }
    if targets.is_empty() {
        return;
    }

    let keys = targets.keys().cloned().collect::<Vec<_>>();
    doc.tasks().update_many(&keys, |task| {
        if let Some(hit) = targets.get(task.task_id()) {
            task.set_section_x(hit.section_x.clone());
            task.set_section_y(hit.section_y.clone());
        }
    });
    for key in keys {
        delta.record_updated(EntityRef::Task(key));
    }
}

fn apply_section_op(doc: &BoardDocument, op: &SectionOp, delta: &mut DeltaBuilder) {
    match op {
        SectionOp::Insert {
            section_id,
            orientation,
            index,
            name,
        } => {
            if section_orientation(doc, section_id).is_some() {
                return;
            }

            let axis = orientation.axis();
            let intervals = partition_for(doc, *orientation);
            let tasks = doc.tasks().all();
            let edges = doc.edges().all();
            let shifts = insert_plan(
                &intervals,
                *index,
                AXIS_HEADER_OFFSET,
                NEW_SECTION_SIZE,
                &tasks,
                &edges,
                axis,
            );

            doc.sections(*orientation).insert(Section::new(
                section_id.clone(),
                name.clone(),
                *orientation,
                NEW_SECTION_SIZE,
            ));
            doc.splice_order(*orientation, *index, section_id.clone());
            apply_shifts(doc, axis, &shifts.tasks, &shifts.edges, shifts.amount, delta);
            refresh_memberships(doc, delta);
            delta.record_added(EntityRef::Section(section_id.clone()));
        }
        SectionOp::Resize {
            section_id,
            orientation,
            boundary,
        } => {
            let axis = orientation.axis();
            let intervals = partition_for(doc, *orientation);
            let tasks = doc.tasks().all();
            let edges = doc.edges().all();
            let Some(plan) = capture_resize(&intervals, section_id, &tasks, &edges, axis) else {
                return;
            };
            apply_resize_plan_inner(doc, &plan, *boundary, delta);
        }
        SectionOp::Delete { section_id } => {
            let Some(orientation) = section_orientation(doc, section_id) else {
                return;
            };
            let Some(section) = doc.sections(orientation).get(section_id) else {
                return;
            };

            let axis = orientation.axis();
            let intervals = partition_for(doc, orientation);
            let tasks = doc.tasks().all();
            let edges = doc.edges().all();
            if let Some(shifts) = delete_plan(&intervals, &section, &tasks, &edges, axis) {
                apply_shifts(doc, axis, &shifts.tasks, &shifts.edges, shifts.amount, delta);
            }

            doc.remove_order(orientation, section_id);
            doc.sections(orientation).remove(section_id);
            refresh_memberships(doc, delta);
            delta.record_removed(EntityRef::Section(section_id.clone()));
        }
    }
}

fn apply_resize_plan_inner(
    doc: &BoardDocument,
    plan: &ResizePlan,
    boundary: f64,
    delta: &mut DeltaBuilder,
) {
    let resolved = plan.resolve(boundary);
    let orientation = orientation_for_axis(plan.axis());
    let resized = doc
        .sections(orientation)
        .update(plan.section_id(), |section| {
            section.set_size(resolved.new_size);
        });
    if !resized {
        return;
    }
    delta.record_updated(EntityRef::Section(plan.section_id().clone()));

    let beyond = plan.beyond();
    apply_shifts(doc, plan.axis(), &beyond.tasks, &beyond.edges, resolved.shift, delta);
    refresh_memberships(doc, delta);
}

fn apply_task_op(doc: &BoardDocument, op: &TaskOp, delta: &mut DeltaBuilder) {
    match op {
        TaskOp::Insert {
            task_id,
            position,
            title,
            description,
            estimate,
            link,
        } => {
            if doc.tasks().contains(task_id) {
                return;
            }

            let partition_x = partition_for(doc, Orientation::Vertical);
            let partition_y = partition_for(doc, Orientation::Horizontal);
            let hit = map_to_sections(&partition_x, &partition_y, *position);

            let mut task = Task::new(task_id.clone(), *position, title.clone());
            task.set_description(description.clone());
            task.set_estimate(*estimate);
            task.set_link(link.clone());
            task.set_section_x(hit.section_x);
            task.set_section_y(hit.section_y);
            doc.tasks().insert(task);
            delta.record_added(EntityRef::Task(task_id.clone()));
        }
        TaskOp::Move { task_id, position } => {
            if !doc.tasks().contains(task_id) {
                return;
            }

            let partition_x = partition_for(doc, Orientation::Vertical);
            let partition_y = partition_for(doc, Orientation::Horizontal);
            let hit = map_to_sections(&partition_x, &partition_y, *position);

            doc.tasks().update(task_id, |task| {
                task.set_position(*position);
                task.set_section_x(hit.section_x.clone());
                task.set_section_y(hit.section_y.clone());
            });
            delta.record_updated(EntityRef::Task(task_id.clone()));
        }
        TaskOp::Update { task_id, patch } => {
            if doc.tasks().update(task_id, |task| task.apply_patch(patch)) {
                delta.record_updated(EntityRef::Task(task_id.clone()));
            }
        }
        TaskOp::Delete { task_id } => {
            if doc.tasks().remove(task_id).is_none() {
                return;
            }
            delta.record_removed(EntityRef::Task(task_id.clone()));

            // Cascade: edges die with either endpoint.
            for edge in doc.edges().remove_where(|edge| edge.is_incident_to(task_id)) {
                delta.record_removed(EntityRef::Edge(edge.edge_id().clone()));
            }
        }
    }
}

/// Resolves a drop point to the first task card containing it, in key order.
fn find_task_at(tasks: &[Task], point: Point) -> Option<TaskId> {
    tasks
        .iter()
        .find(|task| {
            let position = task.position();
            position.x <= point.x
                && point.x < position.x + TASK_CARD_WIDTH
                && position.y <= point.y
                && point.y < position.y + TASK_CARD_HEIGHT
        })
        .map(|task| task.task_id().clone())
}

fn apply_edge_op(doc: &BoardDocument, op: &EdgeOp, delta: &mut DeltaBuilder) {
    match op {
        EdgeOp::Insert {
            edge_id,
            source_task_id,
            target,
        } => {
            if doc.edges().contains(edge_id) {
                return;
            }
            let Some(source) = doc.tasks().get(source_task_id) else {
                return;
            };

            let target_task_id = match target {
                EdgeTarget::Task(task_id) => task_id.clone(),
                EdgeTarget::Point(point) => match find_task_at(&doc.tasks().all(), *point) {
                    Some(task_id) => task_id,
                    None => return,
                },
            };
            if &target_task_id == source_task_id {
                return;
            }
            let Some(target) = doc.tasks().get(&target_task_id) else {
                return;
            };
            let duplicate = !doc
                .edges()
                .query(|edge| edge.connects_pair(source_task_id, &target_task_id))
                .is_empty();
            if duplicate {
                return;
            }

            let break_x = (source.position().x + target.position().x) / 2.0;
            doc.edges().insert(Edge::new(
                edge_id.clone(),
                source_task_id.clone(),
                target_task_id,
                break_x,
            ));
            delta.record_added(EntityRef::Edge(edge_id.clone()));
        }
        EdgeOp::SetBreak { edge_id, break_x } => {
            if doc.edges().update(edge_id, |edge| edge.set_break_x(*break_x)) {
                delta.record_updated(EntityRef::Edge(edge_id.clone()));
            }
        }
        EdgeOp::Delete { edge_id } => {
            if doc.edges().remove(edge_id).is_some() {
                delta.record_removed(EntityRef::Edge(edge_id.clone()));
            }
        }
    }
}
