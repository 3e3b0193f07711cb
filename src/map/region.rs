/// Outline polygons drawn beneath the markers, in reference canvas pixels
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionGeometry {
    /// Region border, stroked as an open polyline
    pub outline: Vec<(f64, f64)>,
    /// Enclave inside the neighbouring country, drawn like the region
    pub enclave: Vec<(f64, f64)>,
    pub lake: Vec<(f64, f64)>,
}

impl RegionGeometry {
    /// Built-in Baden-Württemberg tables for the default 763x878 canvas
    pub fn builtin() -> Self {
        Self {
            outline: OUTLINE.to_vec(),
            enclave: ENCLAVE.to_vec(),
            lake: LAKE.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

/// Baden-Württemberg border
const OUTLINE: &[(f64, f64)] = &[
    (425.0, 797.0), (534.0, 833.0), (540.0, 830.0), (543.0, 826.0), (560.0, 827.0), (568.0, 822.0), (584.0, 811.0), (593.0, 800.0),
    (608.0, 804.0), (618.0, 807.0), (634.0, 798.0), (650.0, 798.0), (659.0, 803.0), (670.0, 789.0), (663.0, 776.0), (651.0, 759.0),
    (664.0, 752.0), (668.0, 745.0), (660.0, 728.0), (654.0, 727.0), (661.0, 723.0), (662.0, 708.0), (656.0, 694.0), (661.0, 687.0),
    (665.0, 676.0), (669.0, 669.0), (670.0, 653.0), (670.0, 640.0), (662.0, 629.0), (658.0, 616.0), (656.0, 601.0), (651.0, 590.0),
    (650.0, 576.0), (644.0, 563.0), (634.0, 547.0), (627.0, 536.0), (642.0, 507.0), (660.0, 500.0), (676.0, 506.0), (689.0, 495.0),
    (695.0, 493.0), (693.0, 488.0), (700.0, 483.0), (712.0, 482.0), (711.0, 472.0), (711.0, 460.0), (709.0, 452.0), (715.0, 450.0),
    (699.0, 432.0), (702.0, 421.0), (713.0, 422.0), (718.0, 420.0), (724.0, 433.0), (732.0, 420.0), (742.0, 415.0), (737.0, 430.0),
    (757.0, 419.0), (747.0, 404.0), (740.0, 399.0), (740.0, 386.0), (744.0, 375.0), (745.0, 366.0), (741.0, 361.0), (747.0, 350.0),
    (747.0, 344.0), (747.0, 335.0), (738.0, 318.0), (734.0, 316.0), (737.0, 311.0), (726.0, 302.0), (721.0, 293.0), (714.0, 294.0),
    (698.0, 287.0), (700.0, 280.0), (685.0, 267.0), (695.0, 248.0), (679.0, 235.0), (666.0, 230.0), (664.0, 211.0), (663.0, 207.0),
    (667.0, 205.0), (667.0, 192.0), (667.0, 180.0), (661.0, 179.0), (673.0, 158.0), (672.0, 153.0), (663.0, 126.0), (661.0, 116.0),
    (655.0, 100.0), (644.0, 105.0), (649.0, 109.0), (628.0, 123.0), (624.0, 122.0), (614.0, 119.0), (616.0, 102.0), (610.0, 93.0),
    (611.0, 84.0), (600.0, 99.0), (591.0, 93.0), (596.0, 88.0), (602.0, 69.0), (591.0, 54.0), (595.0, 47.0), (585.0, 33.0),
    (575.0, 37.0), (565.0, 31.0), (556.0, 43.0), (544.0, 40.0), (548.0, 32.0), (547.0, 20.0), (550.0, 7.0), (530.0, 22.0),
    (517.0, 17.0), (509.0, 8.0), (500.0, 13.0), (491.0, 11.0), (484.0, 11.0), (469.0, 15.0), (464.0, 25.0), (477.0, 28.0),
    (475.0, 33.0), (485.0, 39.0), (491.0, 33.0), (494.0, 44.0), (488.0, 51.0), (494.0, 56.0), (485.0, 62.0), (475.0, 61.0),
    (465.0, 57.0), (457.0, 65.0), (452.0, 80.0), (447.0, 85.0), (439.0, 88.0), (416.0, 92.0), (408.0, 91.0), (419.0, 102.0),
    (417.0, 111.0), (411.0, 105.0), (405.0, 106.0), (394.0, 115.0), (383.0, 114.0), (381.0, 116.0), (379.0, 131.0), (367.0, 135.0),
    (362.0, 145.0), (345.0, 152.0), (350.0, 141.0), (348.0, 128.0), (358.0, 127.0), (366.0, 113.0), (350.0, 116.0), (348.0, 105.0),
    (340.0, 108.0), (334.0, 108.0), (320.0, 96.0), (314.0, 81.0), (317.0, 67.0), (293.0, 73.0), (292.0, 78.0), (298.0, 96.0),
    (279.0, 102.0), (261.0, 79.0), (250.0, 85.0), (250.0, 96.0), (254.0, 130.0), (270.0, 136.0), (267.0, 147.0), (267.0, 148.0),
    (260.0, 154.0), (262.0, 159.0), (266.0, 166.0), (257.0, 175.0), (264.0, 185.0), (259.0, 193.0), (246.0, 205.0), (244.0, 217.0),
    (236.0, 231.0), (235.0, 245.0), (232.0, 261.0), (227.0, 269.0), (214.0, 297.0), (210.0, 302.0), (199.0, 311.0), (187.0, 318.0),
    (182.0, 328.0), (166.0, 362.0), (156.0, 376.0), (132.0, 389.0), (112.0, 422.0), (98.0, 432.0), (89.0, 475.0), (79.0, 486.0),
    (73.0, 512.0), (72.0, 544.0), (70.0, 549.0), (55.0, 572.0), (43.0, 595.0), (33.0, 609.0), (27.0, 624.0), (24.0, 655.0),
    (37.0, 678.0), (26.0, 693.0), (25.0, 706.0), (20.0, 726.0), (15.0, 763.0), (6.0, 778.0), (19.0, 805.0), (27.0, 826.0),
    (39.0, 819.0), (45.0, 824.0), (35.0, 833.0), (46.0, 844.0), (76.0, 835.0), (85.0, 824.0), (104.0, 829.0), (107.0, 840.0),
    (117.0, 836.0), (137.0, 839.0), (151.0, 837.0), (166.0, 823.0), (176.0, 817.0), (185.0, 820.0), (202.0, 819.0), (211.0, 834.0),
    (237.0, 836.0), (253.0, 831.0), (246.0, 829.0), (251.0, 818.0), (265.0, 814.0), (272.0, 825.0), (281.0, 819.0), (281.0, 809.0),
    (287.0, 806.0), (263.0, 800.0), (249.0, 805.0), (233.0, 798.0), (234.0, 792.0), (234.0, 782.0), (249.0, 762.0), (270.0, 755.0),
    (285.0, 749.0), (293.0, 762.0), (303.0, 759.0), (316.0, 768.0), (315.0, 781.0), (330.0, 797.0), (329.0, 786.0), (324.0, 781.0),
    (336.0, 783.0), (349.0, 786.0), (344.0, 789.0), (350.0, 805.0), (371.0, 802.0),
];

/// Büsingen enclave
const ENCLAVE: &[(f64, f64)] = &[
    (300.0, 792.0), (310.0, 791.0), (306.0, 781.0), (297.0, 782.0),
];

/// Lake Constance
const LAKE: &[(f64, f64)] = &[
    (380.0, 785.0), (375.0, 784.0), (362.0, 776.0), (371.0, 774.0), (388.0, 777.0), (412.0, 789.0), (425.0, 795.0), (433.0, 797.0),
    (426.0, 776.0), (409.0, 765.0), (404.0, 763.0), (390.0, 749.0), (392.0, 745.0), (400.0, 748.0), (412.0, 757.0), (436.0, 772.0),
    (442.0, 784.0), (455.0, 796.0), (458.0, 798.0), (465.0, 801.0), (471.0, 804.0), (481.0, 801.0), (498.0, 808.0), (506.0, 808.0),
    (510.0, 813.0), (515.0, 821.0), (515.0, 826.0), (522.0, 832.0), (534.0, 833.0), (535.0, 836.0), (541.0, 839.0), (546.0, 843.0),
    (562.0, 846.0), (566.0, 852.0), (570.0, 854.0), (572.0, 860.0), (566.0, 867.0), (553.0, 865.0), (543.0, 867.0), (524.0, 868.0),
    (520.0, 872.0), (502.0, 871.0), (492.0, 865.0), (492.0, 858.0), (480.0, 849.0), (479.0, 839.0), (466.0, 832.0), (459.0, 824.0),
    (426.0, 806.0), (423.0, 799.0), (416.0, 802.0), (408.0, 802.0), (388.0, 801.0), (371.0, 802.0), (384.0, 790.0),
];
